//! Core business logic for cafetch.
//!
//! # Modules
//!
//! - [`fetch`] - Count, page and stream search results
//! - [`transform`] - Flatten nested records
//! - [`output`] - Record sinks (JSONL files)
//!
//! # Fetch Workflow
//!
//! 1. **Count**: probe the search with `limit: 1` to read the total
//! 2. **Page**: request `page_size` records at a time, in order
//! 3. **Flatten**: turn each record into a flat key/value object
//! 4. **Write**: append one JSON object per line to the output
//! 5. **Report**: return a [`fetch::FetchSummary`]
//!
//! # Example
//!
//! ```rust,no_run
//! use cafetch::adapters::collectiveaccess::CollectiveAccessClient;
//! use cafetch::config::{secret_string, CollectiveAccessConfig};
//! use cafetch::core::fetch::{FetchParams, PaginatedFetcher};
//! use cafetch::core::output::JsonlWriter;
//! use cafetch::domain::{record::default_bundles, Credentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new(
//!     "https://collections.example.org",
//!     "api",
//!     secret_string("secret".to_string()),
//! );
//! let client = CollectiveAccessClient::new(credentials, &CollectiveAccessConfig::default())?;
//!
//! let params = FetchParams {
//!     search: "*".to_string(),
//!     bundles: default_bundles(),
//!     page_size: 100,
//!     max: 0,
//! };
//!
//! let summary = PaginatedFetcher::new(&client)
//!     .run(&params, || JsonlWriter::open("var/ca_objects.jsonl"))
//!     .await?;
//!
//! println!("Wrote {} of {} records", summary.fetched, summary.target);
//! # Ok(())
//! # }
//! ```

pub mod fetch;
pub mod output;
pub mod transform;
