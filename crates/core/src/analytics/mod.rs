//! Query service over the analytic store: models, the store seam, and the
//! validating service the HTTP layer talks to.

mod analytics_model;
mod analytics_service;
mod analytics_traits;


pub use analytics_model::{
    clamp_history_days, clamp_result_limit, HistoryPoint, MoveDirection, Mover, SectorSnapshot,
    TickerHistory, TickerSector, TickerSnapshot, TrendSignal, VolatileTicker,
};
pub use analytics_service::AnalyticsService;
pub use analytics_traits::{AnalyticsServiceTrait, AnalyticsStore};
