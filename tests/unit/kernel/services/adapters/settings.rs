use super::*;
use crate::kernel::services::ports::settings::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use tempfile::tempdir;

#[test]
fn ensure_settings_file_writes_defaults_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".projtree").join("setting.json");

    ensure_settings_file_at(&path).unwrap();
    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded, Settings::default());
    assert_eq!(loaded.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(loaded.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

    std::fs::write(&path, r#"{ "api_base_url": "http://example.test/api" }"#).unwrap();
    ensure_settings_file_at(&path).unwrap();
    let kept = load_settings_from(&path).unwrap();
    assert_eq!(kept.api_base_url, "http://example.test/api");
    assert_eq!(kept.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}

#[test]
fn partial_settings_fill_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("setting.json");
    std::fs::write(&path, r#"{ "default_project": "42", "request_timeout_secs": 0 }"#).unwrap();

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.default_project.as_deref(), Some("42"));
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.request_timeout().as_secs(), 1);
}

#[test]
fn unreadable_settings_are_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("setting.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(load_settings_from(&path).is_none());
    assert!(load_settings_from(&dir.path().join("missing.json")).is_none());
}

#[test]
fn env_override_replaces_base_url_when_non_empty() {
    let settings = apply_base_url_override(
        Settings::default(),
        Some(" http://remote:9000/api ".to_string()),
    );
    assert_eq!(settings.api_base_url, "http://remote:9000/api");

    let unchanged = apply_base_url_override(Settings::default(), Some("  ".to_string()));
    assert_eq!(unchanged.api_base_url, DEFAULT_API_BASE_URL);

    let unset = apply_base_url_override(Settings::default(), None);
    assert_eq!(unset, Settings::default());
}
