//! Object sinks for staged CSV files.
//!
//! - [`S3ObjectSink`]: conditional, write-once puts to an S3 bucket.
//! - [`LocalObjectSink`]: the same contract against a local directory, for
//!   development runs and tests.

mod local;
mod s3;

pub use local::LocalObjectSink;
pub use s3::{S3ObjectSink, S3SinkConfig};
