use async_trait::async_trait;

use super::ingestion_model::{FundamentalsSummary, IngestionSummary};
use crate::errors::Result;

#[async_trait]
pub trait IngestionServiceTrait: Send + Sync {
    /// Fetches `[today - days_back, today)` for every ticker and stages one
    /// object per ticker that returned rows. Per-ticker failures are logged
    /// and counted, never raised.
    async fn ingest_stock_prices(&self, days_back: u32) -> Result<IngestionSummary>;

    /// Fetches one descriptive row per ticker and stages them as a single
    /// aggregate object. Fetch and write failures are logged and reflected
    /// in the summary, never raised.
    async fn refresh_fundamentals(&self) -> Result<FundamentalsSummary>;
}
