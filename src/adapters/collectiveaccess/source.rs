//! Search source trait
//!
//! The paginated fetcher talks to CollectiveAccess only through
//! [`SearchSource`], so tests can drive it with canned pages.

use crate::domain::search::{SearchRequest, SearchResponse};
use crate::domain::Result;
use async_trait::async_trait;

/// Anything that can answer an object search
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Run one search page
    ///
    /// # Errors
    ///
    /// `Authentication` when no token can be obtained, `Request` on transport
    /// or JSON failures, `Protocol` when the response lacks a usable count.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// Total number of matches, read from a single-record probe
    async fn count(&self, search: &str, bundles: &[String]) -> Result<u64> {
        let probe = SearchRequest::count_probe(search, bundles.to_vec());
        Ok(self.search(&probe).await?.count)
    }

    /// Base URL of the instance, for logging
    fn base_url(&self) -> &str;
}
