//! External system integrations for cafetch.
//!
//! - [`collectiveaccess`] - CollectiveAccess GraphQL services (auth and search)
//!
//! # Design Pattern
//!
//! The fetch loop depends on the [`collectiveaccess::SearchSource`] trait
//! rather than on the HTTP client, so it can be tested with canned pages.
//!
//! ```rust,no_run
//! use cafetch::adapters::collectiveaccess::{CollectiveAccessClient, SearchSource};
//! use cafetch::config::{secret_string, CollectiveAccessConfig};
//! use cafetch::domain::Credentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new(
//!     "https://collections.example.org",
//!     "api",
//!     secret_string("pass".to_string()),
//! );
//! let client = CollectiveAccessClient::new(credentials, &CollectiveAccessConfig::default())?;
//! client.verify_credentials().await?;
//! # Ok(())
//! # }
//! ```

pub mod collectiveaccess;
