//! Market data provider trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, Quote};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source. A
/// provider is a thin client: it performs one remote call per method and
/// reports failures as [`MarketDataError`] without retrying.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use market_pulse_market_data::{MarketDataProvider, MarketDataError, Quote, AssetProfile};
///
/// struct CsvReplayProvider { /* ... */ }
///
/// #[async_trait]
/// impl MarketDataProvider for CsvReplayProvider {
///     fn id(&self) -> &'static str {
///         "CSV_REPLAY"
///     }
///
///     // ... implement get_daily_quotes / get_profile
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider ("YAHOO", ...).
    ///
    /// Used in logs and stamped on returned quotes.
    fn id(&self) -> &'static str;

    /// Fetch daily quotes for `symbol` on the half-open range `[start, end)`.
    ///
    /// Quotes are ordered by timestamp ascending. A symbol that exists but has
    /// no sessions in the range yields [`MarketDataError::NoDataForRange`].
    async fn get_daily_quotes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Quote>, MarketDataError>;

    /// Fetch descriptive company data for `symbol`.
    ///
    /// Default implementation returns a provider error.
    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::ProviderError {
            provider: self.id().to_string(),
            message: "profile not supported".to_string(),
        })
    }
}
