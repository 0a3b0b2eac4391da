//! Row types for the mart queries.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};
use log::debug;

use crate::errors::StorageError;
use market_pulse_core::analytics::{
    HistoryPoint, Mover, SectorSnapshot, TickerSector, TickerSnapshot, TrendSignal,
    VolatileTicker,
};

fn parse_date(column: &str, value: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        StorageError::SerializationError(format!("Invalid {} '{}': {}", column, value, e))
    })
}

fn parse_signal(value: Option<String>) -> Option<TrendSignal> {
    let signal = TrendSignal::from_label(&value?)?;
    if let TrendSignal::Other(label) = &signal {
        debug!("Passing through unrecognized trend signal '{}'", label);
    }
    Some(signal)
}

#[derive(QueryableByName, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TickerSectorDB {
    #[diesel(sql_type = Text)]
    pub ticker: String,
    #[diesel(sql_type = Text)]
    pub sector: String,
}

impl From<TickerSectorDB> for TickerSector {
    fn from(db: TickerSectorDB) -> Self {
        Self {
            ticker: db.ticker,
            sector: db.sector,
        }
    }
}

#[derive(QueryableByName, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TickerSnapshotDB {
    #[diesel(sql_type = Text)]
    pub ticker: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub company_name: Option<String>,
    #[diesel(sql_type = Text)]
    pub sector: String,
    #[diesel(sql_type = Text)]
    pub trade_date: String,
    #[diesel(sql_type = Double)]
    pub close_price: f64,
    #[diesel(sql_type = Nullable<Double>)]
    pub daily_return_pct: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub cumulative_return_pct: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub ma_7_day: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub ma_30_day: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub ma_90_day: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub volatility_30_day: Option<f64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub trend_signal: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub pct_above_ma_30: Option<f64>,
}

impl TryFrom<TickerSnapshotDB> for TickerSnapshot {
    type Error = StorageError;

    fn try_from(db: TickerSnapshotDB) -> Result<Self, Self::Error> {
        Ok(Self {
            trade_date: parse_date("trade_date", &db.trade_date)?,
            ticker: db.ticker,
            company_name: db.company_name,
            sector: db.sector,
            close_price: db.close_price,
            daily_return_pct: db.daily_return_pct,
            cumulative_return_pct: db.cumulative_return_pct,
            ma_7_day: db.ma_7_day,
            ma_30_day: db.ma_30_day,
            ma_90_day: db.ma_90_day,
            volatility_30_day: db.volatility_30_day,
            trend_signal: parse_signal(db.trend_signal),
            pct_above_ma_30: db.pct_above_ma_30,
        })
    }
}

#[derive(QueryableByName, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoryPointDB {
    #[diesel(sql_type = Text)]
    pub trade_date: String,
    #[diesel(sql_type = Double)]
    pub close_price: f64,
    #[diesel(sql_type = Nullable<Double>)]
    pub daily_return_pct: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub cumulative_return_pct: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub ma_7_day: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub ma_30_day: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub ma_90_day: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub volatility_30_day: Option<f64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub trend_signal: Option<String>,
}

impl TryFrom<HistoryPointDB> for HistoryPoint {
    type Error = StorageError;

    fn try_from(db: HistoryPointDB) -> Result<Self, Self::Error> {
        Ok(Self {
            trade_date: parse_date("trade_date", &db.trade_date)?,
            close_price: db.close_price,
            daily_return_pct: db.daily_return_pct,
            cumulative_return_pct: db.cumulative_return_pct,
            ma_7_day: db.ma_7_day,
            ma_30_day: db.ma_30_day,
            ma_90_day: db.ma_90_day,
            volatility_30_day: db.volatility_30_day,
            trend_signal: parse_signal(db.trend_signal),
        })
    }
}

#[derive(QueryableByName, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SectorSnapshotDB {
    #[diesel(sql_type = Text)]
    pub sector: String,
    #[diesel(sql_type = Text)]
    pub trade_month_start: String,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_daily_return_pct: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_volatility: Option<f64>,
    #[diesel(sql_type = BigInt)]
    pub company_count: i64,
    #[diesel(sql_type = BigInt)]
    pub sector_rank_by_return: i64,
}

impl TryFrom<SectorSnapshotDB> for SectorSnapshot {
    type Error = StorageError;

    fn try_from(db: SectorSnapshotDB) -> Result<Self, Self::Error> {
        Ok(Self {
            trade_month_start: parse_date("trade_month_start", &db.trade_month_start)?,
            sector: db.sector,
            avg_daily_return_pct: db.avg_daily_return_pct,
            avg_volatility: db.avg_volatility,
            company_count: db.company_count,
            sector_rank_by_return: db.sector_rank_by_return,
        })
    }
}

#[derive(QueryableByName, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MoverDB {
    #[diesel(sql_type = Text)]
    pub ticker: String,
    #[diesel(sql_type = Text)]
    pub sector: String,
    #[diesel(sql_type = Double)]
    pub close_price: f64,
    #[diesel(sql_type = Nullable<Double>)]
    pub daily_return_pct: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub cumulative_return_pct: Option<f64>,
}

impl From<MoverDB> for Mover {
    fn from(db: MoverDB) -> Self {
        Self {
            ticker: db.ticker,
            sector: db.sector,
            close_price: db.close_price,
            daily_return_pct: db.daily_return_pct,
            cumulative_return_pct: db.cumulative_return_pct,
        }
    }
}

#[derive(QueryableByName, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VolatileTickerDB {
    #[diesel(sql_type = Text)]
    pub ticker: String,
    #[diesel(sql_type = Text)]
    pub sector: String,
    #[diesel(sql_type = Double)]
    pub close_price: f64,
    #[diesel(sql_type = Nullable<Double>)]
    pub volatility_30_day: Option<f64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub trend_signal: Option<String>,
}

impl From<VolatileTickerDB> for VolatileTicker {
    fn from(db: VolatileTickerDB) -> Self {
        Self {
            ticker: db.ticker,
            sector: db.sector,
            close_price: db.close_price,
            volatility_30_day: db.volatility_30_day,
            trend_signal: parse_signal(db.trend_signal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_signals_pass_through() {
        assert_eq!(parse_signal(Some("bullish".into())), Some(TrendSignal::Bullish));
        assert_eq!(
            parse_signal(Some("Sideways ".into())),
            Some(TrendSignal::Other("SIDEWAYS".to_string()))
        );
        assert_eq!(parse_signal(Some("".into())), None);
        assert_eq!(parse_signal(None), None);
    }

    #[test]
    fn bad_dates_are_decode_errors() {
        assert!(parse_date("trade_date", "2024-03-15").is_ok());
        assert!(matches!(
            parse_date("trade_date", "15/03/2024"),
            Err(StorageError::SerializationError(_))
        ));
    }
}
