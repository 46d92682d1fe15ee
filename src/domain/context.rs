//! Error context extension trait
//!
//! Similar to `anyhow::Context`, but the error stays a [`CafetchError`] of the
//! same variant, so exit codes and the fatal/non-fatal split survive the added
//! context.
//!
//! # Examples
//!
//! ```rust
//! use cafetch::domain::{CafetchError, Result};
//! use cafetch::domain::context::ResultExt;
//!
//! fn read_file(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
//! }
//!
//! let err = read_file("/nonexistent/file").unwrap_err();
//! assert!(matches!(err, CafetchError::Io(_)));
//! assert!(err.to_string().starts_with("I/O error: Failed to read /nonexistent/file: "));
//! ```

use crate::domain::errors::CafetchError;
use crate::domain::result::Result;
use std::fmt::Display;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Prefix the error message with `context`
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Like [`context`](Self::context), evaluated only on error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CafetchError>,
{
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| e.into().prefixed(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().prefixed(f()))
    }
}

impl CafetchError {
    /// The same error with `context` in front of its message
    pub fn prefixed(self, context: impl Display) -> Self {
        let wrap = |message: String| format!("{context}: {message}");
        match self {
            CafetchError::Configuration(m) => CafetchError::Configuration(wrap(m)),
            CafetchError::Authentication(m) => CafetchError::Authentication(wrap(m)),
            CafetchError::Request(m) => CafetchError::Request(wrap(m)),
            CafetchError::Protocol(m) => CafetchError::Protocol(wrap(m)),
            CafetchError::Io(m) => CafetchError::Io(wrap(m)),
            CafetchError::Serialization(m) => CafetchError::Serialization(wrap(m)),
            CafetchError::Other(m) => CafetchError::Other(wrap(m)),
        }
    }
}
