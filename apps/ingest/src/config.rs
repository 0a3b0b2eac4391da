use std::path::PathBuf;

use anyhow::bail;
use market_pulse_core::constants::{DEFAULT_FUNDAMENTALS_PREFIX, DEFAULT_STOCK_PREFIX};
use market_pulse_core::ingestion::IngestionConfig;

const DEFAULT_AWS_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    S3 { bucket: String, region: String },
    Local(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub sink: SinkTarget,
    pub ingestion: IngestionConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let sink = match (get("MP_STAGING_DIR"), get("MP_S3_BUCKET")) {
            (Some(dir), _) => SinkTarget::Local(PathBuf::from(dir)),
            (None, Some(bucket)) => SinkTarget::S3 {
                bucket,
                region: get("MP_AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            },
            (None, None) => bail!("Set MP_S3_BUCKET (or MP_STAGING_DIR for a local run)"),
        };

        Ok(Self {
            sink,
            ingestion: IngestionConfig {
                stock_prefix: get("MP_STOCK_PREFIX")
                    .unwrap_or_else(|| DEFAULT_STOCK_PREFIX.to_string()),
                fundamentals_prefix: get("MP_FUNDAMENTALS_PREFIX")
                    .unwrap_or_else(|| DEFAULT_FUNDAMENTALS_PREFIX.to_string()),
            },
        })
    }
}
