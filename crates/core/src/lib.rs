//! Market Pulse Core - domain types, services, and traits.
//!
//! This crate contains the two pieces of the pipeline that carry behaviour:
//! the ingestion routine (provider → staged CSV objects) and the query
//! service (parameterized reads against the analytic store). It is storage-
//! and vendor-agnostic; the seams it defines are implemented by the
//! `storage-sqlite`, `staging` and `market-data` crates.

pub mod analytics;
pub mod constants;
pub mod errors;
pub mod ingestion;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod staging;
pub mod universe;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
