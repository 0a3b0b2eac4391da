use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::analytics_model::{
    clamp_history_days, clamp_result_limit, MoveDirection, Mover, SectorSnapshot, TickerHistory,
    TickerSector, TickerSnapshot, VolatileTicker,
};
use super::analytics_traits::{AnalyticsServiceTrait, AnalyticsStore};
use crate::errors::{Error, Result};
use crate::universe::{validate_sector, Ticker};

pub struct AnalyticsService {
    store: Arc<dyn AnalyticsStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self { store }
    }
}

fn ticker_not_found(ticker: &Ticker) -> Error {
    Error::NotFound(format!("Ticker '{}' not found", ticker))
}

#[async_trait]
impl AnalyticsServiceTrait for AnalyticsService {
    async fn check_health(&self) -> Result<()> {
        self.store.ping().await
    }

    async fn list_tickers(&self) -> Result<Vec<TickerSector>> {
        self.store.list_tickers().await
    }

    async fn get_ticker(&self, ticker: &str) -> Result<TickerSnapshot> {
        let ticker = Ticker::parse(ticker)?;
        self.store
            .latest_ticker_snapshot(&ticker)
            .await?
            .ok_or_else(|| ticker_not_found(&ticker))
    }

    async fn get_ticker_history(&self, ticker: &str, days: Option<u32>) -> Result<TickerHistory> {
        let ticker = Ticker::parse(ticker)?;
        let days = clamp_history_days(days);
        debug!("Reading {} days of history for {}", days, ticker);

        let data = self.store.ticker_history(&ticker, days).await?;
        if data.is_empty() {
            return Err(ticker_not_found(&ticker));
        }
        Ok(TickerHistory {
            ticker: ticker.into(),
            days,
            data,
        })
    }

    async fn get_sector(&self, sector: &str) -> Result<SectorSnapshot> {
        let sector = validate_sector(sector)?;
        self.store
            .latest_sector_snapshot(sector)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Sector '{}' not found", sector)))
    }

    async fn list_sectors(&self) -> Result<Vec<SectorSnapshot>> {
        self.store.latest_sector_snapshots().await
    }

    async fn top_movers(&self, direction: MoveDirection, limit: Option<u32>) -> Result<Vec<Mover>> {
        let limit = clamp_result_limit(limit);
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.store.top_movers(direction, limit).await
    }

    async fn most_volatile(&self, limit: Option<u32>) -> Result<Vec<VolatileTicker>> {
        let limit = clamp_result_limit(limit);
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.store.most_volatile(limit).await
    }
}
