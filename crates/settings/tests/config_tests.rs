use settings::{ConfigError, SystemConfigLoader};

#[test]
fn config_loader_accepts_valid_keys() {
    let input = r#"
[storage]
sqlite_path = ":memory:"
[security]
admin_token = "secret"
[api]
timeout_ms = 5000
"#;
    let config = SystemConfigLoader::from_str(input).expect("config");
    assert_eq!(config.get_string("storage.sqlite_path"), ":memory:");
    assert_eq!(config.get_string("security.admin_token"), "secret");
    assert_eq!(config.get_number("api.timeout_ms"), 5000);
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let config = SystemConfigLoader::from_str("").expect("config");
    assert_eq!(config.get_number("api.timeout_ms"), 30_000);
    assert_eq!(config.get_string("api.user_agent"), "ghost-metrics-wp");
    assert_eq!(config.get_string("security.admin_token"), "");
    assert!(config.keys().is_empty());
}

#[test]
fn config_loader_rejects_unknown_key() {
    let err = SystemConfigLoader::from_str(r#"unknown = { value = "x" }"#).expect_err("error");
    match err {
        ConfigError::UnknownKey(key) => assert_eq!(key, "unknown.value"),
        _ => panic!("expected unknown key error"),
    }
}

#[test]
fn config_loader_rejects_type_mismatch() {
    let err = SystemConfigLoader::from_str(r#"api = { timeout_ms = "slow" }"#).expect_err("error");
    match err {
        ConfigError::TypeMismatch(key, expected) => {
            assert_eq!(key, "api.timeout_ms");
            assert_eq!(expected, "number");
        }
        _ => panic!("expected type mismatch"),
    }
}

#[test]
fn default_template_parses_back() {
    let template = SystemConfigLoader::default_template();
    let config = SystemConfigLoader::from_str(&template).expect("template config");
    assert_eq!(config.get_string("storage.sqlite_path"), "ghost_metrics.sqlite");
    assert_eq!(config.get_number("api.timeout_ms"), 30_000);
    assert_eq!(config.get_string("site.title"), "Ghost Metrics");
}
