use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use market_pulse_market_data::MarketDataProvider;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::ingestion_model::{
    FundamentalsSummary, IngestionConfig, IngestionSummary, TickerOutcome, TickerStatus,
};
use super::ingestion_traits::IngestionServiceTrait;
use crate::constants::CSV_CONTENT_TYPE;
use crate::errors::Result;
use crate::staging::{
    encode_csv, fundamentals_object_key, stock_object_key, DailyBar, FundamentalsRecord,
    ObjectSink,
};
use crate::universe::{Ticker, Universe};

/// Source of "now" for date windows and object keys.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct IngestionService {
    provider: Arc<dyn MarketDataProvider>,
    sink: Arc<dyn ObjectSink>,
    universe: Universe,
    config: IngestionConfig,
    clock: Clock,
}

impl IngestionService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        sink: Arc<dyn ObjectSink>,
        universe: Universe,
        config: IngestionConfig,
    ) -> Self {
        Self {
            provider,
            sink,
            universe,
            config,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    async fn stage_ticker(
        &self,
        run_id: Uuid,
        ticker: &Ticker,
        days_back: u32,
    ) -> TickerStatus {
        let now = (self.clock)();
        let end = now.date_naive();
        let start = end - Duration::days(i64::from(days_back));

        let quotes = match self
            .provider
            .get_daily_quotes(ticker.as_str(), start, end)
            .await
        {
            Ok(quotes) if quotes.is_empty() => {
                warn!(run_id = %run_id, ticker = %ticker, reason = "no rows returned", "Skipping ticker");
                return TickerStatus::Skipped {
                    reason: "no rows returned".to_string(),
                };
            }
            Ok(quotes) => quotes,
            Err(e) => {
                warn!(
                    run_id = %run_id,
                    ticker = %ticker,
                    reason = %e,
                    retry_class = e.retry_class().as_str(),
                    "Skipping ticker"
                );
                return TickerStatus::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        let bars: Vec<DailyBar> = quotes
            .iter()
            .map(|q| DailyBar::from_quote(ticker, q))
            .collect();
        let key = stock_object_key(&self.config.stock_prefix, ticker, now);

        let written = match encode_csv(&bars) {
            Ok(body) => self.sink.put_object(&key, body, CSV_CONTENT_TYPE).await,
            Err(e) => Err(e),
        };

        match written {
            Ok(()) => {
                info!(run_id = %run_id, ticker = %ticker, key = %key, rows = bars.len(), "Staged daily bars");
                TickerStatus::Staged {
                    key,
                    rows: bars.len(),
                }
            }
            Err(e) => {
                error!(run_id = %run_id, ticker = %ticker, key = %key, reason = %e, "Failed to stage daily bars");
                TickerStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl IngestionServiceTrait for IngestionService {
    async fn ingest_stock_prices(&self, days_back: u32) -> Result<IngestionSummary> {
        let run_id = Uuid::now_v7();
        info!(
            run_id = %run_id,
            days_back,
            tickers = self.universe.len(),
            sink = %self.sink.describe(),
            provider = self.provider.id(),
            "Starting stock price ingestion"
        );

        let mut outcomes = Vec::with_capacity(self.universe.len());
        for ticker in self.universe.iter() {
            let status = self.stage_ticker(run_id, ticker, days_back).await;
            outcomes.push(TickerOutcome {
                ticker: ticker.clone(),
                status,
            });
        }

        let succeeded = outcomes.iter().filter(|o| o.is_staged()).count();
        let total = outcomes.len();
        info!(run_id = %run_id, succeeded, total, "Ingestion complete: {}/{} tickers staged", succeeded, total);

        Ok(IngestionSummary {
            run_id,
            succeeded,
            total,
            outcomes,
        })
    }

    async fn refresh_fundamentals(&self) -> Result<FundamentalsSummary> {
        let run_id = Uuid::now_v7();
        info!(run_id = %run_id, tickers = self.universe.len(), "Starting fundamentals refresh");

        let mut records = Vec::with_capacity(self.universe.len());
        for ticker in self.universe.iter() {
            match self.provider.get_profile(ticker.as_str()).await {
                Ok(profile) => records.push(FundamentalsRecord::from_profile(ticker, profile)),
                Err(e) => {
                    warn!(run_id = %run_id, ticker = %ticker, reason = %e, "Skipping fundamentals for ticker");
                }
            }
        }

        let total = self.universe.len();
        if records.is_empty() {
            error!(run_id = %run_id, total, "No fundamentals fetched; nothing staged");
            return Ok(FundamentalsSummary {
                run_id,
                key: None,
                rows: 0,
                total,
            });
        }

        let key = fundamentals_object_key(&self.config.fundamentals_prefix, (self.clock)());
        let written = match encode_csv(&records) {
            Ok(body) => self.sink.put_object(&key, body, CSV_CONTENT_TYPE).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            error!(run_id = %run_id, key = %key, reason = %e, "Failed to stage fundamentals");
            return Ok(FundamentalsSummary {
                run_id,
                key: None,
                rows: 0,
                total,
            });
        }

        info!(run_id = %run_id, key = %key, rows = records.len(), total, "Staged fundamentals snapshot");
        Ok(FundamentalsSummary {
            run_id,
            key: Some(key),
            rows: records.len(),
            total,
        })
    }
}
