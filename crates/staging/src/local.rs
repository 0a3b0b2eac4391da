use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use market_pulse_core::errors::{Result, StagingError};
use market_pulse_core::staging::ObjectSink;

/// Stages objects as files under a root directory, one file per key.
pub struct LocalObjectSink {
    root: PathBuf,
}

impl LocalObjectSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a key to a path under the root. Keys may only contain normal
    /// path segments.
    fn resolve(&self, key: &str) -> std::result::Result<PathBuf, StagingError> {
        let relative = Path::new(key);
        let only_normal = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !only_normal {
            return Err(StagingError::WriteFailed {
                key: key.to_string(),
                message: "key must be a relative path without '..'".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

fn write_failed(key: &str, err: std::io::Error) -> StagingError {
    StagingError::WriteFailed {
        key: key.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl ObjectSink for LocalObjectSink {
    fn describe(&self) -> String {
        format!("file://{}", self.root.display())
    }

    async fn put_object(&self, key: &str, body: Vec<u8>, _content_type: &str) -> Result<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_failed(key, e))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StagingError::AlreadyExists(key.to_string()),
                _ => write_failed(key, e),
            })?;
        file.write_all(&body)
            .await
            .map_err(|e| write_failed(key, e))?;
        file.flush().await.map_err(|e| write_failed(key, e))?;

        debug!(path = %path.display(), bytes = body.len(), "Wrote staged object");
        Ok(())
    }
}
