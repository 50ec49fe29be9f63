#[path = "../src/config.rs"]
mod app_config;

use app_config::{AppConfig, AppConfigOverrides};
use tempfile::tempdir;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let cfg = AppConfig::load_from(Some(dir.path().join("nope")));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "https://picsum.photos");
    assert_eq!(cfg.request_timeout_secs, 10);
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config");
    let cfg = AppConfig {
        log_level: "debug".into(),
        api_base_url: "http://localhost:9000".into(),
        request_timeout_secs: 3,
        trace_spans: true,
        data_path: dir.path().join("data"),
    };
    cfg.save_to(Some(path.clone())).unwrap();

    let loaded = AppConfig::load_from(Some(path));
    assert_eq!(loaded.log_level, "debug");
    assert_eq!(loaded.api_base_url, "http://localhost:9000");
    assert_eq!(loaded.request_timeout_secs, 3);
    assert!(loaded.trace_spans);
    assert_eq!(loaded.data_path, dir.path().join("data"));
}

#[test]
fn test_overrides_win() {
    let dir = tempdir().unwrap();
    let cfg = AppConfig::load_from(Some(dir.path().join("nope"))).apply_overrides(
        &AppConfigOverrides {
            log_level: Some("warn".into()),
            request_timeout_secs: Some(1),
            ..Default::default()
        },
    );
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.request_timeout_secs, 1);
    assert_eq!(cfg.api_base_url, "https://picsum.photos");
}

#[test]
fn test_zero_timeout_override_is_ignored() {
    let dir = tempdir().unwrap();
    let cfg = AppConfig::load_from(Some(dir.path().join("nope"))).apply_overrides(
        &AppConfigOverrides {
            request_timeout_secs: Some(0),
            trace_spans: true,
            ..Default::default()
        },
    );
    assert_eq!(cfg.request_timeout_secs, 10);
    assert!(cfg.trace_spans);
}
