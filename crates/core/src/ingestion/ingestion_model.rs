use serde::Serialize;
use uuid::Uuid;

use crate::constants::{DEFAULT_FUNDAMENTALS_PREFIX, DEFAULT_STOCK_PREFIX};
use crate::universe::Ticker;

/// Where staged objects land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionConfig {
    pub stock_prefix: String,
    pub fundamentals_prefix: String,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            stock_prefix: DEFAULT_STOCK_PREFIX.to_string(),
            fundamentals_prefix: DEFAULT_FUNDAMENTALS_PREFIX.to_string(),
        }
    }
}

/// What happened to a single ticker in a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TickerStatus {
    Staged { key: String, rows: usize },
    /// Provider error or empty result.
    Skipped { reason: String },
    /// Fetched, but encoding or the sink write failed.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerOutcome {
    pub ticker: Ticker,
    #[serde(flatten)]
    pub status: TickerStatus,
}

impl TickerOutcome {
    pub fn is_staged(&self) -> bool {
        matches!(self.status, TickerStatus::Staged { .. })
    }
}

/// Result of one pass over the universe.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionSummary {
    pub run_id: Uuid,
    pub succeeded: usize,
    pub total: usize,
    pub outcomes: Vec<TickerOutcome>,
}

impl IngestionSummary {
    pub fn staged_keys(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                TickerStatus::Staged { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Result of a fundamentals refresh. `key` is `None` and `rows` is zero when
/// nothing was staged, whether no profile was fetched or the write failed.
#[derive(Debug, Clone, Serialize)]
pub struct FundamentalsSummary {
    pub run_id: Uuid,
    pub key: Option<String>,
    pub rows: usize,
    pub total: usize,
}
