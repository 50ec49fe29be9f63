use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;
use std::time::Duration;

/// Create an empty mock server for the Picsum listing endpoint.
pub fn picsum_server() -> Server {
    Server::run()
}

/// Base URL to hand to the client under test.
pub fn base_url(server: &Server) -> String {
    format!("http://{}", server.addr())
}

pub fn photo(id: &str, author: &str) -> serde_json::Value {
    json!({
        "id": id,
        "author": author,
        "width": 640,
        "height": 480,
        "url": format!("https://unsplash.com/photos/{}", id),
        "download_url": format!("https://picsum.photos/id/{}/640/480", id)
    })
}

/// The two-photo page used across the gallery tests.
pub fn photos_body() -> serde_json::Value {
    json!([photo("1", "Alice"), photo("2", "bob")])
}

macro_rules! list_request {
    () => {
        all_of![
            request::method_path("GET", "/v2/list"),
            request::query(url_decoded(contains(("page", "1")))),
            request::query(url_decoded(contains(("limit", "30")))),
        ]
    };
}

/// Expect any number of list requests answered with `body`.
pub fn expect_list(server: &Server, body: serde_json::Value) {
    server.expect(
        Expectation::matching(list_request!())
            .times(1..)
            .respond_with(json_encoded(body)),
    );
}

/// Expect list requests answered with a bare status code.
pub fn expect_list_status(server: &Server, code: u16) {
    server.expect(
        Expectation::matching(list_request!())
            .times(1..)
            .respond_with(status_code(code).body("upstream unavailable")),
    );
}

/// Expect list requests answered with a body that is not a photo array.
pub fn expect_list_malformed(server: &Server) {
    server.expect(
        Expectation::matching(list_request!())
            .times(1..)
            .respond_with(status_code(200).body("{\"photos\": \"nope\"}")),
    );
}

/// Expect one list request that answers only after `delay`.
pub fn expect_list_delayed(server: &Server, delay: Duration) {
    server.expect(
        Expectation::matching(list_request!())
            .times(0..)
            .respond_with(delay_and_then(delay, json_encoded(photos_body()))),
    );
}
