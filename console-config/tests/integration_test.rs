//! Integration tests for console-config

use console_config::*;
use std::env;
use std::io::Write;

#[test]
fn test_builder_reads_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
api_base_url = "https://console.example.com/api/v1"
request_timeout_secs = 20
"#
    )
    .unwrap();

    let manager = ConfigManager::builder()
        .add_file(file.path().to_string_lossy(), None)
        .build()
        .unwrap();

    let settings = ConsoleSettings::load(&manager).unwrap();
    assert_eq!(settings.api_base_url, "https://console.example.com/api/v1");
    assert_eq!(settings.request_timeout_secs, 20);
    assert_eq!(settings.connect_timeout_secs, 10);
}

#[test]
fn test_builder_reads_prefixed_env() {
    unsafe {
        env::set_var("CONSOLE_ITEST_USER_AGENT", "itest-agent");
    }

    let manager = ConfigManager::builder()
        .with_prefix("CONSOLE_ITEST")
        .load_env()
        .build()
        .unwrap();

    assert_eq!(manager.get_string("user_agent").unwrap(), "itest-agent");
    let settings = ConsoleSettings::load(&manager).unwrap();
    assert_eq!(settings.user_agent, "itest-agent");

    unsafe {
        env::remove_var("CONSOLE_ITEST_USER_AGENT");
    }
}

#[test]
fn test_file_overrides_env() {
    unsafe {
        env::set_var("CONSOLE_ORDER_REQUEST_TIMEOUT_SECS", "99");
    }

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"request_timeout_secs": 5}}"#).unwrap();

    let manager = ConfigManager::builder()
        .with_prefix("CONSOLE_ORDER")
        .load_env()
        .add_file(file.path().to_string_lossy(), Some(FileFormat::Json))
        .build()
        .unwrap();

    assert_eq!(manager.get::<u64>("request_timeout_secs").unwrap(), 5);

    unsafe {
        env::remove_var("CONSOLE_ORDER_REQUEST_TIMEOUT_SECS");
    }
}

#[test]
fn test_non_object_file_rejected() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "[1, 2, 3]").unwrap();

    let manager = ConfigManager::new();
    let result = manager.load_file(file.path(), FileFormat::Json);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_missing_dotenv_file_is_error() {
    let manager = ConfigManager::new();
    let result = manager.load_dotenv(Some(std::path::Path::new("/nonexistent/console.env")));
    assert!(result.is_err());
}

#[test]
fn test_invalid_settings_rejected() {
    let manager = ConfigManager::new();
    manager.set("request_timeout_secs", 0).unwrap();

    let err = ConsoleSettings::load(&manager).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}
