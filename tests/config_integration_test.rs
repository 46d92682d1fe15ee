//! Integration tests for configuration loading and credential resolution
//!
//! Tests that touch process environment variables hold `ENV_MUTEX`.

use cafetch::config::resolve::process_env;
use cafetch::config::{load_config, load_config_or_default, resolve_credentials, CredentialArgs};
use cafetch::domain::CafetchError;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for key in [
        "CA_BASE_URL",
        "CA_SERVER",
        "CA_USERNAME",
        "CA_PASSWORD",
        "CAFETCH_IT_PASSWORD",
    ] {
        std::env::remove_var(key);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let file = write_config(
        r#"
[application]
log_level = "debug"

[collectiveaccess]
base_url = "https://collections.example.org"
username = "api"
password = "file-secret"
timeout_seconds = 10
tls_verify = false
token_refresh_seconds = 300

[fetch]
output = "/tmp/objects.jsonl"
page_size = 250
max = 1000
search = "ca_objects.access:1"
bundles = ["ca_objects.idno", "ca_objects.preferred_labels.name"]
strict = true

[logging]
local_enabled = true
local_path = "/tmp/cafetch-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.collectiveaccess.base_url.as_deref(),
        Some("https://collections.example.org")
    );
    assert_eq!(config.collectiveaccess.username.as_deref(), Some("api"));
    assert_eq!(
        config
            .collectiveaccess
            .password
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "file-secret"
    );
    assert_eq!(config.collectiveaccess.timeout_seconds, 10);
    assert!(!config.collectiveaccess.tls_verify);
    assert_eq!(config.collectiveaccess.token_refresh_seconds, 300);
    assert_eq!(config.fetch.output, "/tmp/objects.jsonl");
    assert_eq!(config.fetch.page_size, 250);
    assert_eq!(config.fetch.max, 1000);
    assert_eq!(config.fetch.bundles.len(), 2);
    assert!(config.fetch.strict);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_config_uses_defaults() {
    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(config.collectiveaccess.base_url.is_none());
    assert_eq!(config.collectiveaccess.timeout_seconds, 30);
    assert!(config.collectiveaccess.tls_verify);
    assert_eq!(config.collectiveaccess.token_refresh_seconds, 480);
    assert_eq!(config.fetch.output, "var/ca_objects.jsonl");
    assert_eq!(config.fetch.page_size, 100);
    assert_eq!(config.fetch.max, 0);
    assert_eq!(config.fetch.search, "*");
    assert!(config.fetch.bundles.is_empty());
    assert!(!config.fetch.strict);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_missing_default_file_is_not_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cafetch.toml");

    let config = load_config_or_default(&path, false).unwrap();
    assert_eq!(config.fetch.page_size, 100);

    let err = load_config_or_default(&path, true).unwrap_err();
    assert!(matches!(err, CafetchError::Configuration(_)));
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CAFETCH_IT_PASSWORD", "from-env");

    let file = write_config(
        r#"
[collectiveaccess]
# password = "${NOT_SET_AND_COMMENTED}"
password = "${CAFETCH_IT_PASSWORD}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config
            .collectiveaccess
            .password
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "from-env"
    );

    cleanup_env_vars();
}

#[test]
fn test_env_var_substitution_with_quote_and_backslash() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CAFETCH_IT_PASSWORD", r#"pa"ss\word"#);

    let file = write_config(
        r#"
[collectiveaccess]
username = "api"
password = "${CAFETCH_IT_PASSWORD}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config
            .collectiveaccess
            .password
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        r#"pa"ss\word"#
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[collectiveaccess]
password = "${CAFETCH_IT_PASSWORD}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, CafetchError::Configuration(_)));
    assert!(err.to_string().contains("CAFETCH_IT_PASSWORD"));
}

#[test]
fn test_invalid_config_validation() {
    let cases = [
        "[fetch]\npage_size = 0\n",
        "[application]\nlog_level = \"loud\"\n",
        "[collectiveaccess]\nbase_url = \"ftp://example.org\"\n",
        "[collectiveaccess]\ntimeout_seconds = 0\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ];

    for contents in cases {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            matches!(err, CafetchError::Configuration(_)),
            "expected configuration error for {contents:?}"
        );
    }
}

#[test]
fn test_malformed_toml() {
    let file = write_config("[fetch\npage_size = 10");
    assert!(matches!(
        load_config(file.path()),
        Err(CafetchError::Configuration(_))
    ));
}

#[test]
fn test_credentials_from_process_environment() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CA_SERVER", "https://server.example.org/");
    std::env::set_var("CA_USERNAME", "env-user");
    std::env::set_var("CA_PASSWORD", "env-pass");

    let file = write_config(
        r#"
[collectiveaccess]
base_url = "https://file.example.org"
username = "file-user"
"#,
    );
    let config = load_config(file.path()).unwrap();

    let credentials =
        resolve_credentials(&CredentialArgs::default(), &config.collectiveaccess, &process_env)
            .unwrap();
    assert_eq!(credentials.base_url(), "https://server.example.org");
    assert_eq!(credentials.username(), "env-user");
    assert_eq!(credentials.password().expose_secret().as_ref(), "env-pass");

    // An empty variable counts as unset
    std::env::set_var("CA_SERVER", "");
    let credentials =
        resolve_credentials(&CredentialArgs::default(), &config.collectiveaccess, &process_env)
            .unwrap();
    assert_eq!(credentials.base_url(), "https://file.example.org");

    cleanup_env_vars();
}

#[test]
fn test_missing_credentials_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[collectiveaccess]\nbase_url = \"https://ca.example.org\"\n");
    let config = load_config(file.path()).unwrap();

    let err =
        resolve_credentials(&CredentialArgs::default(), &config.collectiveaccess, &process_env)
            .unwrap_err();
    assert!(matches!(err, CafetchError::Configuration(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("CA_USERNAME"));
}
