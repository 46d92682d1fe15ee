//! Record output
//!
//! The fetcher writes through the [`RecordSink`] trait; [`JsonlWriter`] is the
//! file implementation.

pub mod jsonl;

pub use jsonl::{JsonlWriter, RecordSink};
