use std::time::Duration;

use follicle_cli::config::{
    backend_override, load_config_from, migrate, save_config_in, FollicleConfig, CURRENT_VERSION,
};
use serde_json::json;

#[test]
fn v0_config_gains_timeouts() {
    let v0 = json!({
        "backend_base_url": "http://10.0.0.5:5000",
        "created_at": "2025-01-01T00:00:00Z"
    });
    let migrated = migrate(v0, 0).unwrap();
    assert_eq!(migrated["config_version"], 1);
    assert_eq!(migrated["predict_timeout_secs"], 30);
    assert_eq!(migrated["health_timeout_secs"], 5);

    let config: FollicleConfig = serde_json::from_value(migrated).unwrap();
    assert_eq!(config.backend_base_url, "http://10.0.0.5:5000");
}

#[test]
fn migration_keeps_existing_values() {
    let v0 = json!({
        "backend_base_url": "http://localhost:5000",
        "predict_timeout_secs": 90,
        "created_at": "2025-01-01T00:00:00Z"
    });
    let migrated = migrate(v0, 0).unwrap();
    assert_eq!(migrated["predict_timeout_secs"], 90);
}

#[test]
fn newer_config_is_rejected() {
    let err = migrate(json!({}), CURRENT_VERSION + 1).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_config_is_rejected() {
    assert!(migrate(json!([1, 2, 3]), 0).is_err());
}

#[test]
fn save_then_load_round_trips_and_stamps_version() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = FollicleConfig::new("http://backend.test:8080");
    config.config_version = 0;

    let path = save_config_in(dir.path(), &config).unwrap();
    assert!(!dir.path().join("config.json.tmp").exists());

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.backend_base_url, "http://backend.test:8080");
    assert_eq!(loaded.created_at, config.created_at);
}

#[cfg(unix)]
#[test]
fn saved_config_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = save_config_in(dir.path(), &FollicleConfig::default()).unwrap();
    let mode = std::fs::metadata(path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn v0_file_on_disk_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"backend_base_url": "http://old:5000", "created_at": "2024-06-01T12:00:00Z"}"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.health_timeout_secs, 5);
}

#[test]
fn defaults_point_at_local_backend() {
    let client = FollicleConfig::default().client_config(None);
    assert_eq!(client.base_url, "http://localhost:5000");
    assert_eq!(client.predict_timeout, Duration::from_secs(30));
    assert_eq!(client.health_timeout, Duration::from_secs(5));
}

#[test]
fn override_replaces_configured_url() {
    let config = FollicleConfig::new("http://configured:5000");
    let client = config.client_config(Some("http://override:6000"));
    assert_eq!(client.base_url, "http://override:6000");
}

#[test]
fn flag_wins_over_environment() {
    assert_eq!(
        backend_override(Some("http://flag".into()), Some("http://env".into())).as_deref(),
        Some("http://flag")
    );
    assert_eq!(
        backend_override(None, Some("http://env".into())).as_deref(),
        Some("http://env")
    );
    assert_eq!(backend_override(None, Some("  ".into())), None);
    assert_eq!(backend_override(None, None), None);
}

#[test]
fn zero_timeout_on_disk_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"config_version": 1, "backend_base_url": "http://localhost:5000",
            "predict_timeout_secs": 0, "health_timeout_secs": 5,
            "created_at": "2025-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("predict_timeout_secs"));
}

#[test]
fn zero_timeout_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = FollicleConfig::default();
    config.health_timeout_secs = 0;
    assert!(save_config_in(dir.path(), &config).is_err());
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn oversized_config_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    // 2^32 + 1 would wrap to 1 if truncated.
    std::fs::write(
        &path,
        r#"{"config_version": 4294967297, "backend_base_url": "http://localhost:5000",
            "predict_timeout_secs": 30, "health_timeout_secs": 5,
            "created_at": "2025-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}
