//! Domain error types
//!
//! This module defines the error hierarchy for cafetch. All errors are
//! domain-specific and don't expose third-party types such as `reqwest::Error`.

use thiserror::Error;

/// Main cafetch error type
///
/// Every fallible operation in the crate returns this error. The variants map
/// one-to-one onto the failure classes the fetch loop has to tell apart:
/// authentication problems abort everything, request and protocol problems
/// during paging only end the loop early.
#[derive(Debug, Error)]
pub enum CafetchError {
    /// Missing or invalid settings (no base URL, no credentials, bad TOML)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Login did not yield a usable token
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Transport-level failure: connection refused, timeout, unreadable or
    /// malformed response body
    #[error("Request error: {0}")]
    Request(String),

    /// Well-formed JSON that lacks the fields the protocol promises
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Output file errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl CafetchError {
    /// Whether the error ends the whole run rather than just the current page
    ///
    /// Request and protocol failures while paging are tolerated (the loop stops
    /// and keeps what was written); everything else is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CafetchError::Request(_) | CafetchError::Protocol(_))
    }

    /// Process exit code used by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CafetchError::Configuration(_) => 2,
            CafetchError::Authentication(_) => 3,
            CafetchError::Request(_) | CafetchError::Protocol(_) => 4,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CafetchError {
    fn from(err: std::io::Error) -> Self {
        CafetchError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CafetchError {
    fn from(err: serde_json::Error) -> Self {
        CafetchError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CafetchError {
    fn from(err: toml::de::Error) -> Self {
        CafetchError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CafetchError::Configuration("missing base URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing base URL");

        let err = CafetchError::Protocol("no data.search.count".to_string());
        assert_eq!(err.to_string(), "Protocol error: no data.search.count");
    }

    #[test]
    fn test_is_fatal() {
        assert!(!CafetchError::Request("timeout".into()).is_fatal());
        assert!(!CafetchError::Protocol("missing field".into()).is_fatal());
        assert!(CafetchError::Authentication("no jwt".into()).is_fatal());
        assert!(CafetchError::Io("disk full".into()).is_fatal());
        assert!(CafetchError::Configuration("bad".into()).is_fatal());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CafetchError::Configuration("x".into()).exit_code(), 2);
        assert_eq!(CafetchError::Authentication("x".into()).exit_code(), 3);
        assert_eq!(CafetchError::Request("x".into()).exit_code(), 4);
        assert_eq!(CafetchError::Protocol("x".into()).exit_code(), 4);
        assert_eq!(CafetchError::Io("x".into()).exit_code(), 5);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CafetchError = io_err.into();
        assert!(matches!(err, CafetchError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CafetchError = json_err.into();
        assert!(matches!(err, CafetchError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: CafetchError = toml_err.into();
        assert!(matches!(err, CafetchError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = CafetchError::Request("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
