//! Search request and response types

use super::errors::CafetchError;
use super::record::RawRecord;
use super::result::Result;

/// Table every search runs against
pub const OBJECTS_TABLE: &str = "ca_objects";

/// Parameters of one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Search expression, `*` for everything
    pub search: String,

    /// Bundle identifiers, order preserved in the query
    pub bundles: Vec<String>,

    /// Zero-based offset
    pub start: u64,

    /// Page size, always positive
    pub limit: u64,
}

impl SearchRequest {
    /// Create a request
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when `limit` is zero.
    pub fn new(
        search: impl Into<String>,
        bundles: Vec<String>,
        start: u64,
        limit: u64,
    ) -> Result<Self> {
        if limit == 0 {
            return Err(CafetchError::Configuration(
                "search limit must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            search: search.into(),
            bundles,
            start,
            limit,
        })
    }

    /// The single-record probe used to read the total count
    pub fn count_probe(search: impl Into<String>, bundles: Vec<String>) -> Self {
        Self {
            search: search.into(),
            bundles,
            start: 0,
            limit: 1,
        }
    }
}

/// Parsed `data.search` payload
///
/// `count` is mandatory. `results` is `None` when the response carried no
/// `results[0].result` list at all, which is different from an empty page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// Table the service reports, if any
    pub table: Option<String>,

    /// Total number of matches for the search, independent of paging
    pub count: u64,

    /// Records of this page
    pub results: Option<Vec<RawRecord>>,

    /// GraphQL `errors` entries, serialized, for diagnostics
    pub errors: Option<String>,
}

impl SearchResponse {
    /// Take the page records
    ///
    /// # Errors
    ///
    /// Returns a `Protocol` error when the response had no result list.
    pub fn into_records(self) -> Result<Vec<RawRecord>> {
        match self.results {
            Some(records) => Ok(records),
            None => Err(CafetchError::Protocol(format!(
                "response contains no data.search.results[0].result: {}",
                self.errors.unwrap_or_else(|| "[]".to_string())
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_rejected() {
        let result = SearchRequest::new("*", vec![], 0, 0);
        assert!(matches!(result, Err(CafetchError::Configuration(_))));
    }

    #[test]
    fn test_count_probe() {
        let probe = SearchRequest::count_probe("*", vec!["ca_objects.idno".to_string()]);
        assert_eq!(probe.start, 0);
        assert_eq!(probe.limit, 1);
    }

    #[test]
    fn test_into_records_missing_results_is_protocol_error() {
        let response = SearchResponse {
            table: None,
            count: 12,
            results: None,
            errors: Some(r#"[{"message":"boom"}]"#.to_string()),
        };
        let err = response.into_records().unwrap_err();
        assert!(matches!(err, CafetchError::Protocol(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_into_records_empty_page() {
        let response = SearchResponse {
            table: Some(OBJECTS_TABLE.to_string()),
            count: 12,
            results: Some(vec![]),
            errors: None,
        };
        assert!(response.into_records().unwrap().is_empty());
    }
}
