//! Record transformation
//!
//! [`flatten`] turns nested search results into flat records ready for JSONL
//! output. Dataset-specific enrichment happens outside this crate.

pub mod flatten;

pub use flatten::flatten_record;
