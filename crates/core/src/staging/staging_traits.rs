use async_trait::async_trait;

use crate::errors::Result;

/// Write-only destination for staged objects.
///
/// Implementations must not overwrite an existing key; a collision is
/// reported as `StagingError::AlreadyExists`.
#[async_trait]
pub trait ObjectSink: Send + Sync {
    /// Human-readable destination, used in logs (e.g. `s3://bucket`).
    fn describe(&self) -> String;

    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;
}
