//! Integration tests for configuration loading

use std::io::Write;
use tempfile::NamedTempFile;
use whereclock::infra::Config;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[clock]
locations = ["Home", "School", "Work", "Food"]
people = ["Anna", "Ben", "Kira"]
debug = true

[mqtt]
host = "test-broker"
port = 1884
base_topic = "tracks"
client_id = "test-clock"
username = "clock"
password = "secret"

[http]
port = 9090
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.locations(), ["Home", "School", "Work", "Food"]);
    assert_eq!(config.people(), ["Anna", "Ben", "Kira"]);
    assert!(config.debug());
    assert_eq!(config.mqtt_host(), "test-broker");
    assert_eq!(config.mqtt_port(), 1884);
    assert_eq!(config.mqtt_base_topic(), "tracks");
    assert_eq!(config.mqtt_client_id(), "test-clock");
    assert_eq!(config.mqtt_username(), Some("clock"));
    assert_eq!(config.mqtt_password(), Some("secret"));
    assert_eq!(config.http_port(), 9090);
}

#[test]
fn test_optional_sections_default() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[clock]
locations = []
people = []

[mqtt]
host = "test-broker"
port = 1883
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    // Empty lists are accepted; the registry and roster handle degeneration
    assert!(config.locations().is_empty());
    assert!(config.people().is_empty());
    assert!(!config.debug());
    assert_eq!(config.mqtt_base_topic(), "owntracks");
    assert_eq!(config.http_port(), 8228);
}

#[test]
fn test_load_from_path_fallback() {
    let config = Config::load_from_path("/nonexistent/config.toml");
    assert_eq!(config.mqtt_host(), "localhost");
    assert_eq!(config.mqtt_port(), 1883);
    assert_eq!(config.config_file(), "default");
}
