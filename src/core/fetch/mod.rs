//! Paginated fetching
//!
//! [`PaginatedFetcher`] counts the matches, pages through them and streams
//! flattened records into a sink. [`FetchSummary`] reports how the run ended.

pub mod fetcher;
pub mod summary;

pub use fetcher::{FetchParams, PaginatedFetcher};
pub use summary::{FetchOutcome, FetchSummary};
