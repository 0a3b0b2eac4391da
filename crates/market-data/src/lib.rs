//! Market Pulse Market Data Crate
//!
//! Provider client for the external market-data source. Given a ticker and a
//! half-open date range it returns daily OHLCV quotes; given a ticker it
//! returns a descriptive profile (name, sector, valuation ratios, 52-week
//! range).
//!
//! # Overview
//!
//! ```text
//! +------------------+      +---------------------+
//! | Ingestion (core) | ---> | MarketDataProvider  |  (trait)
//! +------------------+      +---------------------+
//!                                     |
//!                                     v
//!                           +---------------------+
//!                           |   YahooProvider     |  (chart + quoteSummary)
//!                           +---------------------+
//! ```
//!
//! Providers are treated as flaky remote dependencies: every failure is
//! reported as a [`MarketDataError`] and the caller decides what to do with
//! it. Nothing in this crate retries.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{AssetProfile, Quote};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
