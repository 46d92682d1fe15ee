//! Ordered resolution of connection settings
//!
//! Each setting is looked up in a fixed order: command-line argument, then
//! environment variables, then the configuration file. The first non-empty
//! value wins and is returned together with where it came from. If nothing
//! supplies a value the result is a `Configuration` error naming every place
//! the user could have set it.

use super::schema::{validate_base_url, CollectiveAccessConfig};
use super::secret::secret_string;
use crate::domain::{CafetchError, Credentials, Result};
use secrecy::ExposeSecret;
use std::fmt;

/// Environment variables consulted for the base URL, in order
pub const BASE_URL_ENV: &[&str] = &["CA_BASE_URL", "CA_SERVER"];

/// Environment variables consulted for the username
pub const USERNAME_ENV: &[&str] = &["CA_USERNAME"];

/// Environment variables consulted for the password
pub const PASSWORD_ENV: &[&str] = &["CA_PASSWORD"];

/// Where a resolved value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    Argument,
    Environment(&'static str),
    ConfigFile,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Argument => write!(f, "argument"),
            ValueSource::Environment(key) => write!(f, "environment ({key})"),
            ValueSource::ConfigFile => write!(f, "configuration file"),
        }
    }
}

/// A setting value tagged with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: ValueSource,
}

/// Look up an environment variable, treating empty values as unset
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Resolve one setting through argument → environment → config file
///
/// `env` is the environment lookup; production code passes [`process_env`].
///
/// # Errors
///
/// Returns a `Configuration` error when no source provides a non-empty value.
///
/// # Examples
///
/// ```
/// use cafetch::config::resolve::{resolve_setting, ValueSource};
///
/// let env = |key: &str| (key == "CA_USERNAME").then(|| "from-env".to_string());
///
/// let resolved = resolve_setting("username", Some(""), &["CA_USERNAME"], Some("from-file"), &env).unwrap();
/// assert_eq!(resolved.value, "from-env");
/// assert_eq!(resolved.source, ValueSource::Environment("CA_USERNAME"));
/// ```
pub fn resolve_setting(
    label: &str,
    argument: Option<&str>,
    env_keys: &[&'static str],
    config_value: Option<&str>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<Resolved> {
    if let Some(value) = argument.filter(|v| !v.is_empty()) {
        return Ok(Resolved {
            value: value.to_string(),
            source: ValueSource::Argument,
        });
    }

    for key in env_keys {
        if let Some(value) = env(key).filter(|v| !v.is_empty()) {
            return Ok(Resolved {
                value,
                source: ValueSource::Environment(*key),
            });
        }
    }

    if let Some(value) = config_value.filter(|v| !v.is_empty()) {
        return Ok(Resolved {
            value: value.to_string(),
            source: ValueSource::ConfigFile,
        });
    }

    let mut places = vec!["an argument".to_string()];
    places.extend(env_keys.iter().map(|k| k.to_string()));
    places.push("the configuration file".to_string());
    Err(CafetchError::Configuration(format!(
        "CollectiveAccess {label} must be provided via {}",
        places.join(", ")
    )))
}

/// Connection settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct CredentialArgs {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Resolve base URL, username and password into [`Credentials`]
///
/// # Errors
///
/// Returns a `Configuration` error when a setting is missing everywhere or
/// the base URL is not an absolute http(s) URL.
pub fn resolve_credentials(
    args: &CredentialArgs,
    config: &CollectiveAccessConfig,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<Credentials> {
    let base_url = resolve_setting(
        "base URL",
        args.base_url.as_deref(),
        BASE_URL_ENV,
        config.base_url.as_deref(),
        env,
    )?;
    validate_base_url(&base_url.value).map_err(CafetchError::Configuration)?;

    let username = resolve_setting(
        "username",
        args.username.as_deref(),
        USERNAME_ENV,
        config.username.as_deref(),
        env,
    )?;

    let config_password = config
        .password
        .as_ref()
        .map(|p| p.expose_secret().as_ref().to_string());
    let password = resolve_setting(
        "password",
        args.password.as_deref(),
        PASSWORD_ENV,
        config_password.as_deref(),
        env,
    )?;

    tracing::debug!(
        base_url = %base_url.value,
        base_url_source = %base_url.source,
        username_source = %username.source,
        password_source = %password.source,
        "Resolved CollectiveAccess credentials"
    );

    Ok(Credentials::new(
        base_url.value,
        username.value,
        secret_string(password.value),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string_opt;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_argument_wins() {
        let env = env_from(&[("CA_USERNAME", "env-user")]);
        let resolved =
            resolve_setting("username", Some("arg-user"), USERNAME_ENV, Some("file-user"), &env)
                .unwrap();
        assert_eq!(resolved.value, "arg-user");
        assert_eq!(resolved.source, ValueSource::Argument);
    }

    #[test]
    fn test_environment_order() {
        let env = env_from(&[("CA_SERVER", "https://server"), ("CA_BASE_URL", "https://base")]);
        let resolved = resolve_setting("base URL", None, BASE_URL_ENV, None, &env).unwrap();
        assert_eq!(resolved.value, "https://base");
        assert_eq!(resolved.source, ValueSource::Environment("CA_BASE_URL"));

        let env = env_from(&[("CA_SERVER", "https://server")]);
        let resolved = resolve_setting("base URL", None, BASE_URL_ENV, None, &env).unwrap();
        assert_eq!(resolved.source, ValueSource::Environment("CA_SERVER"));
    }

    #[test]
    fn test_config_file_fallback() {
        let env = env_from(&[("CA_USERNAME", "")]);
        let resolved =
            resolve_setting("username", Some(""), USERNAME_ENV, Some("file-user"), &env).unwrap();
        assert_eq!(resolved.value, "file-user");
        assert_eq!(resolved.source, ValueSource::ConfigFile);
    }

    #[test]
    fn test_missing_everywhere() {
        let env = env_from(&[]);
        let err = resolve_setting("password", None, PASSWORD_ENV, None, &env).unwrap_err();
        assert!(matches!(err, CafetchError::Configuration(_)));
        let message = err.to_string();
        assert!(message.contains("password"));
        assert!(message.contains("CA_PASSWORD"));
    }

    #[test]
    fn test_resolve_credentials_mixed_sources() {
        let env = env_from(&[("CA_PASSWORD", "env-pw")]);
        let args = CredentialArgs {
            base_url: Some("https://ca.example.org/".to_string()),
            username: None,
            password: None,
        };
        let config = CollectiveAccessConfig {
            username: Some("file-user".to_string()),
            ..Default::default()
        };

        let creds = resolve_credentials(&args, &config, &env).unwrap();
        assert_eq!(creds.base_url(), "https://ca.example.org");
        assert_eq!(creds.username(), "file-user");
        assert_eq!(creds.password().expose_secret().as_ref(), "env-pw");
    }

    #[test]
    fn test_resolve_credentials_password_from_config() {
        let env = env_from(&[]);
        let config = CollectiveAccessConfig {
            base_url: Some("https://ca.example.org".to_string()),
            username: Some("api".to_string()),
            password: secret_string_opt(Some("file-pw".to_string())),
            ..Default::default()
        };

        let creds = resolve_credentials(&CredentialArgs::default(), &config, &env).unwrap();
        assert_eq!(creds.password().expose_secret().as_ref(), "file-pw");
    }

    #[test]
    fn test_resolve_credentials_rejects_bad_url() {
        let env = env_from(&[("CA_USERNAME", "u"), ("CA_PASSWORD", "p")]);
        let args = CredentialArgs {
            base_url: Some("ca.example.org".to_string()),
            ..Default::default()
        };
        let err = resolve_credentials(&args, &CollectiveAccessConfig::default(), &env).unwrap_err();
        assert!(matches!(err, CafetchError::Configuration(_)));
    }

    #[test]
    fn test_resolve_credentials_missing_base_url() {
        let env = env_from(&[("CA_USERNAME", "u"), ("CA_PASSWORD", "p")]);
        let err = resolve_credentials(
            &CredentialArgs::default(),
            &CollectiveAccessConfig::default(),
            &env,
        )
        .unwrap_err();
        assert!(err.to_string().contains("CA_BASE_URL"));
    }
}
