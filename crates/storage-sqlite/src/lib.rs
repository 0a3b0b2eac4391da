//! SQLite adapter for the Market Pulse analytic store.
//!
//! This crate implements [`market_pulse_core::analytics::AnalyticsStore`] over
//! the mart tables produced by the external transformation job. It is the
//! only place in the workspace where Diesel appears.
//!
//! ```text
//!  core (AnalyticsService)
//!          │  AnalyticsStore
//!          ▼
//!  storage-sqlite (this crate) ── one read-only connection per call
//!          │
//!          ▼
//!   mart_daily_returns / mart_moving_averages / mart_sector_performance
//! ```

pub mod analytics;
pub mod db;
pub mod errors;
pub mod schema;

pub use analytics::SqliteAnalyticsStore;
pub use db::open_read_only;
pub use errors::{IntoCore, StorageError};

// Re-export from market-pulse-core for convenience
pub use market_pulse_core::errors::{DatabaseError, Error, Result};
