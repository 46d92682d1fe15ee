//! Configuration schema types
//!
//! Every section and every field has a default, so an empty file (or no file
//! at all) is a valid configuration. Credentials are usually supplied through
//! the CLI or `CA_*` environment variables instead of the file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Root configuration structure that maps to the TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CafetchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// CollectiveAccess connection settings
    #[serde(default)]
    pub collectiveaccess: CollectiveAccessConfig,

    /// Fetch defaults
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CafetchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.collectiveaccess.validate()?;
        self.fetch.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// CollectiveAccess server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectiveAccessConfig {
    /// Base URL of the instance, e.g. `https://collections.example.org`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Login name
    #[serde(default)]
    pub username: Option<String>,

    /// Login password, zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Verify TLS certificates
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Age in seconds after which a cached JWT is replaced by a fresh login
    #[serde(default = "default_token_refresh_seconds")]
    pub token_refresh_seconds: u64,
}

/// Upper bound for the token refresh window (one day)
pub const MAX_TOKEN_REFRESH_SECONDS: u64 = 86_400;

impl CollectiveAccessConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(base_url) = self.base_url.as_deref().filter(|u| !u.is_empty()) {
            validate_base_url(base_url)?;
        }

        if self.timeout_seconds == 0 {
            return Err("collectiveaccess.timeout_seconds must be greater than 0".to_string());
        }

        if self.token_refresh_seconds == 0 {
            return Err(
                "collectiveaccess.token_refresh_seconds must be greater than 0".to_string(),
            );
        }

        if self.token_refresh_seconds > MAX_TOKEN_REFRESH_SECONDS {
            return Err(format!(
                "collectiveaccess.token_refresh_seconds must be at most {MAX_TOKEN_REFRESH_SECONDS}"
            ));
        }

        Ok(())
    }
}

impl Default for CollectiveAccessConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            password: None,
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
            token_refresh_seconds: default_token_refresh_seconds(),
        }
    }
}

/// Check that a base URL is an absolute http(s) URL
pub fn validate_base_url(base_url: &str) -> Result<(), String> {
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(format!(
            "base URL '{base_url}' must start with http:// or https://"
        ));
    }
    url::Url::parse(base_url).map_err(|e| format!("base URL '{base_url}' is invalid: {e}"))?;
    Ok(())
}

/// Defaults for the `fetch` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Output JSONL path
    #[serde(default = "default_output")]
    pub output: String,

    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Maximum total records, 0 = all
    #[serde(default)]
    pub max: u64,

    /// Search expression
    #[serde(default = "default_search")]
    pub search: String,

    /// Bundles to request, empty = built-in default list
    #[serde(default)]
    pub bundles: Vec<String>,

    /// Exit non-zero when paging stops on an error
    #[serde(default)]
    pub strict: bool,
}

impl FetchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("fetch.page_size must be greater than 0".to_string());
        }
        if self.output.trim().is_empty() {
            return Err("fetch.output cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            page_size: default_page_size(),
            max: 0,
            search: default_search(),
            bundles: Vec::new(),
            strict: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to files in `local_path`
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_token_refresh_seconds() -> u64 {
    480
}

fn default_output() -> String {
    "var/ca_objects.jsonl".to_string()
}

fn default_page_size() -> u64 {
    100
}

fn default_search() -> String {
    "*".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
