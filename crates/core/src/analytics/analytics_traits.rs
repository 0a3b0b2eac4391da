use async_trait::async_trait;

use super::analytics_model::{
    HistoryPoint, MoveDirection, Mover, SectorSnapshot, TickerHistory, TickerSector,
    TickerSnapshot, VolatileTicker,
};
use crate::errors::Result;
use crate::universe::Ticker;

/// Read-only access to the analytic marts.
///
/// Each call is independent and resolves "latest" against the data as it is
/// at call time. Filter values arrive pre-validated and must still be bound
/// as query parameters.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Cheap reachability probe.
    async fn ping(&self) -> Result<()>;

    async fn list_tickers(&self) -> Result<Vec<TickerSector>>;

    async fn latest_ticker_snapshot(&self, ticker: &Ticker) -> Result<Option<TickerSnapshot>>;

    async fn ticker_history(&self, ticker: &Ticker, days: u32) -> Result<Vec<HistoryPoint>>;

    /// Latest month for one sector, matched case-insensitively.
    async fn latest_sector_snapshot(&self, sector: &str) -> Result<Option<SectorSnapshot>>;

    /// Every sector's row for the latest month, ordered by rank.
    async fn latest_sector_snapshots(&self) -> Result<Vec<SectorSnapshot>>;

    async fn top_movers(&self, direction: MoveDirection, limit: u32) -> Result<Vec<Mover>>;

    async fn most_volatile(&self, limit: u32) -> Result<Vec<VolatileTicker>>;
}

#[async_trait]
pub trait AnalyticsServiceTrait: Send + Sync {
    async fn check_health(&self) -> Result<()>;
    async fn list_tickers(&self) -> Result<Vec<TickerSector>>;
    async fn get_ticker(&self, ticker: &str) -> Result<TickerSnapshot>;
    async fn get_ticker_history(&self, ticker: &str, days: Option<u32>) -> Result<TickerHistory>;
    async fn get_sector(&self, sector: &str) -> Result<SectorSnapshot>;
    async fn list_sectors(&self) -> Result<Vec<SectorSnapshot>>;
    async fn top_movers(&self, direction: MoveDirection, limit: Option<u32>) -> Result<Vec<Mover>>;
    async fn most_volatile(&self, limit: Option<u32>) -> Result<Vec<VolatileTicker>>;
}
