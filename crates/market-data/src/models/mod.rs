//! Market data models
//!
//! - `quote` - Daily OHLCV quote returned by providers
//! - `profile` - Descriptive company data (sector, valuation ratios, 52-week range)

mod profile;
mod quote;

pub use profile::AssetProfile;
pub use quote::Quote;
