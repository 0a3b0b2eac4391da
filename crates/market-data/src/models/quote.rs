use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily market data quote
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Session timestamp reported by the provider
    pub timestamp: DateTime<Utc>,

    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,

    /// Trading volume (shares)
    pub volume: u64,

    /// Source of the quote (YAHOO, ...)
    pub source: String,
}

impl Quote {
    /// Create a full OHLCV quote
    pub fn ohlcv(
        timestamp: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            source: source.into(),
        }
    }

    /// Trading day this quote belongs to.
    pub fn trade_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Rescale open/high/low/close so that `close` becomes `adjusted_close`.
    ///
    /// Providers report split- and dividend-adjusted closes separately; applying
    /// the same ratio to the other prices yields a consistent adjusted bar.
    /// A zero close is left untouched.
    pub fn adjusted_to(mut self, adjusted_close: Decimal) -> Self {
        if self.close.is_zero() || adjusted_close == self.close {
            return self;
        }
        let factor = adjusted_close / self.close;
        self.open *= factor;
        self.high *= factor;
        self.low *= factor;
        self.close = adjusted_close;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample() -> Quote {
        Quote::ohlcv(
            Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap(),
            dec!(100),
            dec!(110),
            dec!(90),
            dec!(100),
            1_000_000,
            "YAHOO",
        )
    }

    #[test]
    fn test_trade_date_uses_utc_day() {
        assert_eq!(
            sample().trade_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_adjusted_to_scales_all_prices() {
        let quote = sample().adjusted_to(dec!(50));
        assert_eq!(quote.open, dec!(50));
        assert_eq!(quote.high, dec!(55));
        assert_eq!(quote.low, dec!(45));
        assert_eq!(quote.close, dec!(50));
        assert_eq!(quote.volume, 1_000_000);
    }

    #[test]
    fn test_adjusted_to_ignores_zero_close() {
        let mut quote = sample();
        quote.close = Decimal::ZERO;
        let adjusted = quote.clone().adjusted_to(dec!(10));
        assert_eq!(adjusted, quote);
    }
}
