use chrono::NaiveDate;
use market_pulse_core::analytics as core_analytics;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TickerSector {
    pub ticker: String,
    pub sector: String,
}

impl From<core_analytics::TickerSector> for TickerSector {
    fn from(t: core_analytics::TickerSector) -> Self {
        Self {
            ticker: t.ticker,
            sector: t.sector,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct TickerListResponse {
    pub tickers: Vec<TickerSector>,
    pub count: usize,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TickerResponse {
    pub ticker: String,
    pub company_name: Option<String>,
    pub sector: String,
    pub trade_date: NaiveDate,
    pub close_price: f64,
    pub daily_return_pct: Option<f64>,
    pub cumulative_return_pct: Option<f64>,
    pub ma_7_day: Option<f64>,
    pub ma_30_day: Option<f64>,
    pub ma_90_day: Option<f64>,
    pub volatility_30_day: Option<f64>,
    /// `BULLISH` or `BEARISH`
    pub trend_signal: Option<String>,
    pub pct_above_ma_30: Option<f64>,
}

impl From<core_analytics::TickerSnapshot> for TickerResponse {
    fn from(s: core_analytics::TickerSnapshot) -> Self {
        Self {
            ticker: s.ticker,
            company_name: s.company_name,
            sector: s.sector,
            trade_date: s.trade_date,
            close_price: s.close_price,
            daily_return_pct: s.daily_return_pct,
            cumulative_return_pct: s.cumulative_return_pct,
            ma_7_day: s.ma_7_day,
            ma_30_day: s.ma_30_day,
            ma_90_day: s.ma_90_day,
            volatility_30_day: s.volatility_30_day,
            trend_signal: s.trend_signal.map(|t| t.to_string()),
            pct_above_ma_30: s.pct_above_ma_30,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub trade_date: NaiveDate,
    pub close_price: f64,
    pub daily_return_pct: Option<f64>,
    pub cumulative_return_pct: Option<f64>,
    pub ma_7_day: Option<f64>,
    pub ma_30_day: Option<f64>,
    pub ma_90_day: Option<f64>,
    pub volatility_30_day: Option<f64>,
    pub trend_signal: Option<String>,
}

impl From<core_analytics::HistoryPoint> for HistoryPoint {
    fn from(p: core_analytics::HistoryPoint) -> Self {
        Self {
            trade_date: p.trade_date,
            close_price: p.close_price,
            daily_return_pct: p.daily_return_pct,
            cumulative_return_pct: p.cumulative_return_pct,
            ma_7_day: p.ma_7_day,
            ma_30_day: p.ma_30_day,
            ma_90_day: p.ma_90_day,
            volatility_30_day: p.volatility_30_day,
            trend_signal: p.trend_signal.map(|t| t.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TickerHistoryResponse {
    pub ticker: String,
    /// Effective window after clamping
    pub days: u32,
    pub data: Vec<HistoryPoint>,
}

impl From<core_analytics::TickerHistory> for TickerHistoryResponse {
    fn from(h: core_analytics::TickerHistory) -> Self {
        Self {
            ticker: h.ticker,
            days: h.days,
            data: h.data.into_iter().map(HistoryPoint::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct SectorResponse {
    pub sector: String,
    pub trade_month_start: NaiveDate,
    pub avg_daily_return_pct: Option<f64>,
    pub avg_volatility: Option<f64>,
    pub company_count: i64,
    pub sector_rank_by_return: i64,
}

impl From<core_analytics::SectorSnapshot> for SectorResponse {
    fn from(s: core_analytics::SectorSnapshot) -> Self {
        Self {
            sector: s.sector,
            trade_month_start: s.trade_month_start,
            avg_daily_return_pct: s.avg_daily_return_pct,
            avg_volatility: s.avg_volatility,
            company_count: s.company_count,
            sector_rank_by_return: s.sector_rank_by_return,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SectorListResponse {
    pub sectors: Vec<SectorResponse>,
    pub count: usize,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct Mover {
    pub ticker: String,
    pub sector: String,
    pub close_price: f64,
    pub daily_return_pct: Option<f64>,
    pub cumulative_return_pct: Option<f64>,
}

impl From<core_analytics::Mover> for Mover {
    fn from(m: core_analytics::Mover) -> Self {
        Self {
            ticker: m.ticker,
            sector: m.sector,
            close_price: m.close_price,
            daily_return_pct: m.daily_return_pct,
            cumulative_return_pct: m.cumulative_return_pct,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct TopGainersResponse {
    pub top_gainers: Vec<Mover>,
    pub count: usize,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct TopLosersResponse {
    pub top_losers: Vec<Mover>,
    pub count: usize,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct VolatileTicker {
    pub ticker: String,
    pub sector: String,
    pub close_price: f64,
    pub volatility_30_day: Option<f64>,
    pub trend_signal: Option<String>,
}

impl From<core_analytics::VolatileTicker> for VolatileTicker {
    fn from(v: core_analytics::VolatileTicker) -> Self {
        Self {
            ticker: v.ticker,
            sector: v.sector,
            close_price: v.close_price,
            volatility_30_day: v.volatility_30_day,
            trend_signal: v.trend_signal.map(|t| t.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MostVolatileResponse {
    pub most_volatile: Vec<VolatileTicker>,
    pub count: usize,
}

/// `?limit=` for the ranking endpoints.
#[derive(Deserialize, Debug, Default)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

/// `?days=` for ticker history.
#[derive(Deserialize, Debug, Default)]
pub struct HistoryQuery {
    pub days: Option<u32>,
}
