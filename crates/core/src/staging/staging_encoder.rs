use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::OBJECT_KEY_TIMESTAMP_FORMAT;
use crate::errors::{Result, StagingError};
use crate::universe::Ticker;

/// Serializes rows to UTF-8 CSV with a header row taken from the field names.
///
/// An empty slice encodes to an empty payload (no header).
pub fn encode_csv<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| StagingError::Encode(e.to_string()).into())
}

/// `{prefix}/{TICKER}_{%Y%m%d_%H%M%S}.csv`
pub fn stock_object_key(prefix: &str, ticker: &Ticker, at: DateTime<Utc>) -> String {
    format!(
        "{}/{}_{}.csv",
        prefix.trim_end_matches('/'),
        ticker,
        at.format(OBJECT_KEY_TIMESTAMP_FORMAT)
    )
}

/// `{prefix}/fundamentals_{%Y%m%d_%H%M%S}.csv`
pub fn fundamentals_object_key(prefix: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}/fundamentals_{}.csv",
        prefix.trim_end_matches('/'),
        at.format(OBJECT_KEY_TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::{DailyBar, FundamentalsRecord};
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    fn ticker(s: &str) -> Ticker {
        Ticker::parse(s).unwrap()
    }

    #[test]
    fn bars_encode_with_exact_header() {
        let bar = DailyBar {
            ticker: ticker("AAPL"),
            trade_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            open_price: dec!(170.5),
            high_price: dec!(172.25),
            low_price: dec!(169.75),
            close_price: dec!(171),
            volume: 52_000_000,
        };
        let csv = String::from_utf8(encode_csv(&[bar]).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("ticker,trade_date,open_price,high_price,low_price,close_price,volume")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("AAPL,2024-03-15,170.5,172.25,169.75,171"));
        assert!(row.ends_with(",52000000"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn fundamentals_encode_missing_values_as_empty() {
        let record = FundamentalsRecord {
            ticker: ticker("GE"),
            company_name: Some("GE Aerospace".into()),
            sector: Some("Industrials".into()),
            industry: None,
            market_cap: Some(180_000_000_000),
            pe_ratio: None,
            fifty_two_week_high: Some(194.8),
            fifty_two_week_low: None,
        };
        let csv = String::from_utf8(encode_csv(&[record]).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "ticker,company_name,sector,industry,market_cap,pe_ratio,fifty_two_week_high,fifty_two_week_low"
        );
        assert_eq!(lines[1], "GE,GE Aerospace,Industrials,,180000000000,,194.8,");
    }

    #[test]
    fn empty_rows_encode_to_nothing() {
        let rows: Vec<DailyBar> = Vec::new();
        assert!(encode_csv(&rows).unwrap().is_empty());
    }

    #[test]
    fn keys_follow_timestamp_scheme() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 21, 5, 9).unwrap();
        assert_eq!(
            stock_object_key("stock_prices", &ticker("msft"), at),
            "stock_prices/MSFT_20240315_210509.csv"
        );
        assert_eq!(
            stock_object_key("raw/stock_prices/", &ticker("BRK.B"), at),
            "raw/stock_prices/BRK.B_20240315_210509.csv"
        );
        assert_eq!(
            fundamentals_object_key("fundamentals", at),
            "fundamentals/fundamentals_20240315_210509.csv"
        );
    }

    #[test]
    fn keys_differ_across_runs_on_the_same_day() {
        let first = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 3, 15, 17, 30, 0).unwrap();
        assert_ne!(
            stock_object_key("p", &ticker("AAPL"), first),
            stock_object_key("p", &ticker("AAPL"), second)
        );
    }
}
