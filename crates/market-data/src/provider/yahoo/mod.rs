//! Yahoo Finance market data provider.
//!
//! Daily bars come from the chart API through `yahoo_finance_api`; company
//! profiles come from the `quoteSummary` endpoint, which needs a cookie and
//! crumb pair obtained once per provider instance.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use reqwest::{header, StatusCode};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, Quote};
use crate::provider::MarketDataProvider;

use models::{YahooQuoteSummaryResponse, YahooQuoteSummaryResult};

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Yahoo authentication data for the quoteSummary endpoint
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    ///
    /// Fails only when the underlying HTTP clients cannot be built.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| provider_error(format!(
            "Failed to initialize Yahoo connector: {}",
            e
        )))?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            connector,
            client,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }
        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| provider_error("Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| provider_error(format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };
        *self.crumb.write().await = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    // ========================================================================
    // Quote Fetching
    // ========================================================================

    /// Midnight UTC of `date` as the `time` type the Yahoo client expects.
    fn date_to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, MarketDataError> {
        let timestamp = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid date: {}", date),
            })?;
        OffsetDateTime::from_unix_timestamp(timestamp).map_err(|e| {
            MarketDataError::ValidationFailed {
                message: format!("Invalid date {}: {}", date, e),
            }
        })
    }

    /// Convert a Yahoo quote to an adjusted daily [`Quote`].
    fn yahoo_quote_to_quote(yahoo_quote: &yahoo::Quote) -> Result<Quote, MarketDataError> {
        let timestamp = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        let price = |value: f64, field: &str| {
            Decimal::from_f64_retain(value).ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Failed to convert {} {} to Decimal", field, value),
            })
        };

        let quote = Quote::ohlcv(
            timestamp,
            price(yahoo_quote.open, "open")?,
            price(yahoo_quote.high, "high")?,
            price(yahoo_quote.low, "low")?,
            price(yahoo_quote.close, "close")?,
            yahoo_quote.volume,
            PROVIDER_ID,
        );

        // Yahoo reports the split/dividend adjusted close separately
        match Decimal::from_f64_retain(yahoo_quote.adjclose) {
            Some(adjclose) if adjclose > Decimal::ZERO => Ok(quote.adjusted_to(adjclose)),
            _ => Ok(quote),
        }
    }

    // ========================================================================
    // Profile Fetching
    // ========================================================================

    /// Fetch profile using quoteSummary API (richest data source).
    async fn fetch_quote_summary_profile(
        &self,
        symbol: &str,
    ) -> Result<AssetProfile, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price,summaryProfile,summaryDetail&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    provider_error(format!("Profile request failed: {}", e))
                }
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                self.clear_crumb().await;
                return Err(provider_error("Yahoo authentication expired"));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            _ => {}
        }

        let data: YahooQuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse profile response: {}", e)))?;

        let result = data
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(map_quote_summary_to_profile(symbol, &result))
    }

    /// Fetch profile using search (last resort, name only).
    async fn fetch_search_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let result = self
            .connector
            .search_ticker(&encode(symbol))
            .await
            .map_err(|e| provider_error(e.to_string()))?;

        let item = result
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(AssetProfile {
            name: Some(format_name(
                Some(&item.long_name),
                Some(&item.short_name),
                symbol,
            )),
            ..Default::default()
        })
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_daily_quotes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Quote>, MarketDataError> {
        debug!("Fetching daily quotes for {} from {} to {} from Yahoo", symbol, start, end);

        if start >= end {
            return Err(MarketDataError::NoDataForRange);
        }

        let response = self
            .connector
            .get_quote_history(
                symbol,
                Self::date_to_offset_datetime(start)?,
                Self::date_to_offset_datetime(end)?,
            )
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    provider_error(e.to_string())
                }
            })?;

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let quotes: Vec<Quote> = yahoo_quotes
                    .iter()
                    .filter_map(|q| match Self::yahoo_quote_to_quote(q) {
                        Ok(quote) => Some(quote),
                        Err(e) => {
                            warn!("Skipping {} quote due to conversion error: {}", symbol, e);
                            None
                        }
                    })
                    .filter(|q| {
                        let day = q.trade_date();
                        day >= start && day < end
                    })
                    .collect();

                if quotes.is_empty() {
                    return Err(MarketDataError::NoDataForRange);
                }

                Ok(quotes)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No daily quotes returned for '{}' between {} and {}",
                    symbol, start, end
                );
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(provider_error(e.to_string())),
        }
    }

    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        debug!("Fetching profile for {} from Yahoo", symbol);

        match self.fetch_quote_summary_profile(symbol).await {
            Ok(profile) => return Ok(profile),
            Err(e @ MarketDataError::RateLimited { .. }) => return Err(e),
            Err(e) => {
                debug!(
                    "quoteSummary failed for {}: {}, trying search fallback",
                    symbol, e
                );
            }
        }

        self.fetch_search_profile(symbol).await
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn provider_error(message: impl Into<String>) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: message.into(),
    }
}

/// Map a quoteSummary result to an [`AssetProfile`].
fn map_quote_summary_to_profile(symbol: &str, result: &YahooQuoteSummaryResult) -> AssetProfile {
    let price = result.price.as_ref();
    let summary = result.summary_profile.as_ref();
    let detail = result.summary_detail.as_ref();

    let name = format_name(
        price.and_then(|p| p.long_name.as_deref()),
        price.and_then(|p| p.short_name.as_deref()),
        symbol,
    );

    AssetProfile {
        name: Some(name),
        sector: summary
            .and_then(|s| s.sector.as_deref())
            .map(format_sector),
        industry: summary.and_then(|s| s.industry.clone()),
        market_cap: detail.and_then(|d| d.market_cap.as_ref()).and_then(|v| v.raw),
        pe_ratio: detail.and_then(|d| d.trailing_pe.as_ref()).and_then(|v| v.raw),
        week_52_high: detail
            .and_then(|d| d.fifty_two_week_high.as_ref())
            .and_then(|v| v.raw),
        week_52_low: detail
            .and_then(|d| d.fifty_two_week_low.as_ref())
            .and_then(|v| v.raw),
    }
}

/// Company display name: long name, then short name, then the symbol.
fn format_name(long_name: Option<&str>, short_name: Option<&str>, symbol: &str) -> String {
    let name = long_name.unwrap_or("").replace("&amp;", "&");
    let name = name.trim();

    if !name.is_empty() {
        return name.to_string();
    }
    match short_name.map(str::trim) {
        Some(short) if !short.is_empty() => short.to_string(),
        _ => symbol.to_string(),
    }
}

/// Convert snake_case sector to Title Case.
fn format_sector(sector: &str) -> String {
    sector
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================
