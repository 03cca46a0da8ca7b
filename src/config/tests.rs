use super::{ConfigError, load_config};

const BASE_CONFIG: &str = r#"
data_file = "data/ricorrenze.json"
email_to = "target@example.com"

[relay]
host = "relay.example.com:465"
user = "relay-user"
secret = "relay-secret"
mail = "sender@example.com"

[telegram]
bot_token = "123456:TEST"
chat_id = 42
"#;

#[test]
fn minimal_config_gets_documented_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, BASE_CONFIG).expect("write config");

    let config = load_config(&path).expect("load");
    assert_eq!(config.alarm_hour, 9);
    assert_eq!(config.poll_interval_secs, 60);
    assert!(!config.debug);
    assert!(!config.simulation.enabled);
    assert_eq!(config.web_check.url, "");
    assert_eq!(config.web_check.interval_secs, 6 * 60 * 60);
    assert!(!config.web_check.placeholder.is_empty());
}

#[test]
fn custom_override_file_merges_on_top_per_key() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, BASE_CONFIG).expect("write config");
    std::fs::write(
        dir.path().join("config_custom.toml"),
        r#"
alarm_hour = 10

[relay]
host = "other.example.com:465"
"#,
    )
    .expect("write custom config");

    let config = load_config(&path).expect("load");
    // overridden keys win
    assert_eq!(config.alarm_hour, 10);
    assert_eq!(config.relay.host, "other.example.com:465");
    // untouched keys survive from the base file
    assert_eq!(config.relay.user, "relay-user");
    assert_eq!(config.email_to, "target@example.com");
}

#[test]
fn missing_config_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = load_config(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "data_file = [").expect("write config");

    let result = load_config(&path);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn validation_rejects_out_of_range_values() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, BASE_CONFIG.replace("chat_id = 42", "chat_id = 0"))
        .expect("write config");

    let result = load_config(&path);
    assert!(matches!(result, Err(ConfigError::Validation(_))));

    std::fs::write(&path, format!("alarm_hour = 24\n{}", BASE_CONFIG)).expect("write config");
    let result = load_config(&path);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}
