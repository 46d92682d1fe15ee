//! CollectiveAccess GraphQL integration
//!
//! - [`query`] builds the query strings with escaped literals
//! - [`models`] interprets the response envelopes
//! - [`token`] caches the login JWT
//! - [`client`] performs the HTTP calls
//! - [`source`] is the seam the fetcher depends on

pub mod client;
pub mod models;
pub mod query;
pub mod source;
pub mod token;

pub use client::CollectiveAccessClient;
pub use source::SearchSource;
pub use token::{Token, TokenCache, DEFAULT_REFRESH_AFTER_SECS};
