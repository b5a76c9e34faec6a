use std::io::Write;
use std::time::Duration;

use solsieve::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use solsieve::{Config, SolsieveError};

#[test]
fn load_full_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[oracle]
model = "gemini-2.5-pro"
base_url = "http://localhost:8080"
api_key_env = "SOLSIEVE_KEY"

[session]
request_timeout_secs = 45
"#
    )
    .unwrap();

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.oracle.model, "gemini-2.5-pro");
    assert_eq!(config.oracle.base_url, "http://localhost:8080");
    assert_eq!(config.oracle.api_key_env, "SOLSIEVE_KEY");
    assert_eq!(
        config.session.request_timeout(),
        Some(Duration::from_secs(45))
    );
}

#[test]
fn partial_config_keeps_defaults() {
    let config = Config::from_toml("[session]\nrequest_timeout_secs = 10\n").unwrap();

    assert_eq!(config.oracle.model, DEFAULT_MODEL);
    assert_eq!(config.oracle.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.session.request_timeout_secs, Some(10));
}

#[test]
fn explicit_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = Config::load(Some(&missing)).unwrap_err();

    assert!(matches!(err, SolsieveError::Configuration(_)));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn invalid_toml_is_a_configuration_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[oracle\nmodel = ").unwrap();

    let err = Config::load(Some(file.path())).unwrap_err();

    assert!(err.is_fatal());
}

#[test]
fn wrong_types_are_rejected() {
    let err = Config::from_toml("[session]\nrequest_timeout_secs = \"soon\"\n").unwrap_err();
    assert!(matches!(err, SolsieveError::Configuration(_)));
}

#[test]
fn api_key_lookup_uses_configured_variable() {
    let config = Config::from_toml("[oracle]\napi_key_env = \"MY_KEY\"\n").unwrap();

    let key = config
        .api_key_with(|name| (name == "MY_KEY").then(|| " sk-123 ".to_string()))
        .unwrap();

    assert_eq!(key, "sk-123");
}

#[test]
fn api_key_missing_everywhere_names_the_variable() {
    let config = Config::from_toml("[oracle]\napi_key_env = \"MY_KEY\"\n").unwrap();

    let err = config.api_key_with(|_| None).unwrap_err();

    assert!(err.is_fatal());
    assert!(err.to_string().contains("MY_KEY"));
}
