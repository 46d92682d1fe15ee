//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Human-readable console output on stderr
//! - Optional JSON log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use cafetch::logging::init_logging;
//! use cafetch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a fetch
///
/// # Example
///
/// ```no_run
/// use cafetch::log_fetch_start;
///
/// log_fetch_start!("https://ca.example.org", "*", 237);
/// ```
#[macro_export]
macro_rules! log_fetch_start {
    ($base_url:expr, $search:expr, $target:expr) => {
        tracing::info!(
            base_url = %$base_url,
            search = %$search,
            target = $target,
            "Starting fetch"
        );
    };
}

/// Log one page written to the output
///
/// # Example
///
/// ```no_run
/// use cafetch::log_page_fetched;
///
/// log_page_fetched!(100, 100, 200, 237);
/// ```
#[macro_export]
macro_rules! log_page_fetched {
    ($start:expr, $received:expr, $fetched:expr, $target:expr) => {
        tracing::debug!(
            start = $start,
            received = $received,
            fetched = $fetched,
            target = $target,
            progress_pct = ($fetched as f64 / $target as f64 * 100.0),
            "Fetched page"
        );
    };
}

/// Log the end of a fetch
///
/// # Example
///
/// ```no_run
/// use cafetch::log_fetch_complete;
/// use std::time::Duration;
///
/// log_fetch_complete!(237, Duration::from_secs(4));
/// ```
#[macro_export]
macro_rules! log_fetch_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis(),
            "Fetch completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cafetch::log_error_with_context;
/// use cafetch::domain::CafetchError;
///
/// let error = CafetchError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::CafetchError;
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        log_fetch_start!("https://ca.example.org", "*", 10u64);
        log_page_fetched!(0u64, 10usize, 10u64, 10u64);
        log_fetch_complete!(10u64, Duration::from_millis(5));
        log_error_with_context!(CafetchError::Other("x".to_string()), "test");
    }
}
