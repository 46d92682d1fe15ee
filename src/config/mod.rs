//! Configuration management for cafetch.
//!
//! Settings come from three layers, highest priority first:
//!
//! 1. Command-line arguments
//! 2. Environment variables (`CA_BASE_URL`/`CA_SERVER`, `CA_USERNAME`,
//!    `CA_PASSWORD`; a `.env` file is loaded at startup)
//! 3. An optional TOML file (`cafetch.toml` by default)
//!
//! The file supports `${VAR_NAME}` substitution:
//!
//! ```toml
//! [collectiveaccess]
//! base_url = "https://collections.example.org"
//! username = "api"
//! password = "${CA_PASSWORD}"
//!
//! [fetch]
//! page_size = 100
//! ```
//!
//! ```rust,no_run
//! use cafetch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cafetch.toml")?;
//! println!("Page size: {}", config.fetch.page_size);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod resolve;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use resolve::{resolve_credentials, CredentialArgs, ValueSource};
pub use schema::{
    ApplicationConfig, CafetchConfig, CollectiveAccessConfig, FetchConfig, LoggingConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
