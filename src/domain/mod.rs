//! Domain models and types for cafetch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Connection credentials** ([`Credentials`]) and their context hash
//! - **Search types** ([`SearchRequest`], [`SearchResponse`])
//! - **Record types** ([`RawRecord`], [`Bundle`], [`FlatRecord`])
//! - **Error types** ([`CafetchError`]), the [`Result`] alias and the
//!   [`ResultExt`] context helpers
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CafetchError>`]:
//!
//! ```rust
//! use cafetch::domain::{CafetchError, Result};
//!
//! fn example() -> Result<()> {
//!     let request = cafetch::domain::SearchRequest::new("*", vec![], 0, 100)?;
//!     assert_eq!(request.limit, 100);
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod credentials;
pub mod errors;
pub mod record;
pub mod result;
pub mod search;

// Re-export commonly used types for convenience
pub use context::ResultExt;
pub use credentials::Credentials;
pub use errors::CafetchError;
pub use record::{Bundle, BundleValue, FlatRecord, RawRecord, DEFAULT_BUNDLES};
pub use result::Result;
pub use search::{SearchRequest, SearchResponse};
