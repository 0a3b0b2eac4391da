use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HISTORY_DAYS, DEFAULT_RESULT_LIMIT, MAX_HISTORY_DAYS, MAX_RESULT_LIMIT,
};

/// Categorical label derived externally from moving-average relationships.
///
/// Labels other than `BULLISH`/`BEARISH` are carried through verbatim
/// (trimmed and upper-cased) in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrendSignal {
    Bullish,
    Bearish,
    Other(String),
}

impl TrendSignal {
    pub fn as_str(&self) -> &str {
        match self {
            TrendSignal::Bullish => "BULLISH",
            TrendSignal::Bearish => "BEARISH",
            TrendSignal::Other(label) => label,
        }
    }

    /// Reads a stored label; blank values are absent.
    pub fn from_label(raw: &str) -> Option<Self> {
        let label = raw.trim().to_ascii_uppercase();
        match label.as_str() {
            "" => None,
            "BULLISH" => Some(TrendSignal::Bullish),
            "BEARISH" => Some(TrendSignal::Bearish),
            _ => Some(TrendSignal::Other(label)),
        }
    }
}

impl fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TrendSignal {
    fn from(raw: String) -> Self {
        TrendSignal::from_label(&raw).unwrap_or(TrendSignal::Other(raw))
    }
}

impl From<TrendSignal> for String {
    fn from(signal: TrendSignal) -> Self {
        signal.as_str().to_string()
    }
}

/// Which end of the daily-return ranking to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Gainers,
    Losers,
}

/// A distinct (ticker, sector) pair present in the daily returns mart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSector {
    pub ticker: String,
    pub sector: String,
}

/// Latest row for a ticker, joined across returns and moving averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSnapshot {
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
    pub trend_signal: Option<TrendSignal>,
    pub pct_above_ma_30: Option<f64>,
}

/// One day of a ticker's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub trade_date: NaiveDate,
    pub close_price: f64,
    pub daily_return_pct: Option<f64>,
    pub cumulative_return_pct: Option<f64>,
    pub ma_7_day: Option<f64>,
    pub ma_30_day: Option<f64>,
    pub ma_90_day: Option<f64>,
    pub volatility_30_day: Option<f64>,
    pub trend_signal: Option<TrendSignal>,
}

/// Most recent `days` rows for a ticker, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerHistory {
    pub ticker: String,
    pub days: u32,
    pub data: Vec<HistoryPoint>,
}

/// One sector's rollup for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSnapshot {
    pub sector: String,
    pub trade_month_start: NaiveDate,
    pub avg_daily_return_pct: Option<f64>,
    pub avg_volatility: Option<f64>,
    pub company_count: i64,
    pub sector_rank_by_return: i64,
}

/// A row in the top gainers / top losers ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub ticker: String,
    pub sector: String,
    pub close_price: f64,
    pub daily_return_pct: Option<f64>,
    pub cumulative_return_pct: Option<f64>,
}

/// A row in the 30-day volatility ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatileTicker {
    pub ticker: String,
    pub sector: String,
    pub close_price: f64,
    pub volatility_30_day: Option<f64>,
    pub trend_signal: Option<TrendSignal>,
}

/// History window in days: defaults to 30, clamped to `[1, 365]`.
pub fn clamp_history_days(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_HISTORY_DAYS)
        .clamp(1, MAX_HISTORY_DAYS)
}

/// Ranking size: defaults to 5, capped at 20.
pub fn clamp_result_limit(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_RESULT_LIMIT)
        .min(MAX_RESULT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trend_signal_reads_labels_case_insensitively() {
        assert_eq!(TrendSignal::from_label("bullish"), Some(TrendSignal::Bullish));
        assert_eq!(TrendSignal::from_label(" BEARISH "), Some(TrendSignal::Bearish));
        assert_eq!(TrendSignal::from_label("   "), None);
    }

    #[test]
    fn unrecognized_trend_labels_are_kept() {
        let signal = TrendSignal::from_label(" sideways").unwrap();
        assert_eq!(signal, TrendSignal::Other("SIDEWAYS".to_string()));
        assert_eq!(signal.to_string(), "SIDEWAYS");
        assert_eq!(serde_json::to_string(&signal).unwrap(), "\"SIDEWAYS\"");
    }

    #[test]
    fn trend_signal_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&TrendSignal::Bullish).unwrap(),
            "\"BULLISH\""
        );
    }

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(clamp_history_days(None), 30);
        assert_eq!(clamp_result_limit(None), 5);
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(clamp_history_days(Some(0)), 1);
        assert_eq!(clamp_history_days(Some(366)), 365);
        assert_eq!(clamp_result_limit(Some(50)), 20);
        assert_eq!(clamp_result_limit(Some(0)), 0);
    }

    proptest! {
        #[test]
        fn history_days_above_cap_behave_like_cap(days in 365u32..=u32::MAX) {
            prop_assert_eq!(clamp_history_days(Some(days)), clamp_history_days(Some(365)));
        }

        #[test]
        fn history_days_stay_in_range(days in any::<u32>()) {
            let clamped = clamp_history_days(Some(days));
            prop_assert!((1..=MAX_HISTORY_DAYS).contains(&clamped));
        }

        #[test]
        fn result_limit_never_exceeds_cap(limit in any::<u32>()) {
            let clamped = clamp_result_limit(Some(limit));
            prop_assert!(clamped <= MAX_RESULT_LIMIT);
            if limit <= MAX_RESULT_LIMIT {
                prop_assert_eq!(clamped, limit);
            }
        }
    }
}
