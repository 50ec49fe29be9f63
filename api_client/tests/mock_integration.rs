use api_client::{FetchError, PhotoId, PhotoSource, PicsumClient};
use std::time::Duration;

#[tokio::test]
async fn test_fetch_page_returns_photos_in_order() {
    let server = mocks::picsum_server();
    mocks::expect_list(&server, mocks::photos_body());

    let client = PicsumClient::with_base_url(mocks::base_url(&server));
    let photos = client.fetch_page().await.unwrap();
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].id, PhotoId::from("1"));
    assert_eq!(photos[0].author, "Alice");
    assert_eq!(photos[1].author, "bob");
}

#[tokio::test]
async fn test_non_success_status_is_fetch_error() {
    let server = mocks::picsum_server();
    mocks::expect_list_status(&server, 503);

    let client = PicsumClient::with_base_url(mocks::base_url(&server));
    let err = client.fetch_page().await.unwrap_err();
    match err {
        FetchError::StatusError { status, .. } => assert_eq!(status, 503),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = mocks::picsum_server();
    mocks::expect_list_malformed(&server);

    let client = PicsumClient::with_base_url(mocks::base_url(&server));
    let err = client.fetch_page().await.unwrap_err();
    assert!(matches!(err, FetchError::ParseError(_)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = mocks::picsum_server();
    mocks::expect_list_delayed(&server, Duration::from_millis(500));

    let client = PicsumClient::with_base_url(mocks::base_url(&server))
        .with_timeout(Duration::from_millis(50));
    let err = client.fetch_page().await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_request_error() {
    let client = PicsumClient::with_base_url("http://127.0.0.1:9".into())
        .with_timeout(Duration::from_secs(2));
    let err = client.fetch_page().await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::RequestError(_) | FetchError::Timeout(_)
    ));
}
