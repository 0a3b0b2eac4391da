use chrono::NaiveDate;
use market_pulse_market_data::{AssetProfile, Quote};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::universe::Ticker;

/// Fractional digits kept on staged prices.
const PRICE_SCALE: u32 = 4;

/// One day's open/high/low/close/volume for one ticker, as staged.
///
/// Field names are the CSV header, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBar {
    pub ticker: Ticker,
    pub trade_date: NaiveDate,
    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub close_price: Decimal,
    pub volume: u64,
}

impl DailyBar {
    pub fn from_quote(ticker: &Ticker, quote: &Quote) -> Self {
        Self {
            ticker: ticker.clone(),
            trade_date: quote.trade_date(),
            open_price: quote.open.round_dp(PRICE_SCALE),
            high_price: quote.high.round_dp(PRICE_SCALE),
            low_price: quote.low.round_dp(PRICE_SCALE),
            close_price: quote.close.round_dp(PRICE_SCALE),
            volume: quote.volume,
        }
    }
}

/// Descriptive snapshot for one ticker. Missing values stage as empty fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundamentalsRecord {
    pub ticker: Ticker,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<u64>,
    pub pe_ratio: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

impl FundamentalsRecord {
    pub fn from_profile(ticker: &Ticker, profile: AssetProfile) -> Self {
        Self {
            ticker: ticker.clone(),
            company_name: profile.name,
            sector: profile.sector,
            industry: profile.industry,
            market_cap: profile
                .market_cap
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u64),
            pe_ratio: profile.pe_ratio,
            fifty_two_week_high: profile.week_52_high,
            fifty_two_week_low: profile.week_52_low,
        }
    }
}
