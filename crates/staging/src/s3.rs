use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use market_pulse_core::errors::{Error, Result, StagingError};
use market_pulse_core::staging::ObjectSink;

const PRECONDITION_FAILED: u16 = 412;

#[derive(Debug, Clone)]
pub struct S3SinkConfig {
    pub bucket: String,
    pub region: String,
}

/// Stages objects in S3. Credentials come from the ambient AWS chain.
pub struct S3ObjectSink {
    client: Client,
    bucket: String,
}

impl S3ObjectSink {
    /// Resolves region and credentials and builds the client.
    pub async fn connect(config: S3SinkConfig) -> Result<Self> {
        if config.bucket.trim().is_empty() {
            return Err(Error::Config("S3 bucket name is empty".to_string()));
        }
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .load()
            .await;
        Ok(Self::with_client(Client::new(&sdk_config), config.bucket))
    }

    pub fn with_client(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectSink for S3ObjectSink {
    fn describe(&self) -> String {
        format!("s3://{}", self.bucket)
    }

    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        debug!(bucket = %self.bucket, key, bytes = body.len(), "Uploading object");
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .if_none_match("*")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                let status = match &e {
                    SdkError::ServiceError(ctx) => Some(ctx.raw().status().as_u16()),
                    _ => None,
                };
                if status == Some(PRECONDITION_FAILED) {
                    StagingError::AlreadyExists(key.to_string())
                } else {
                    StagingError::WriteFailed {
                        key: key.to_string(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                }
            })?;
        Ok(())
    }
}
