use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

lazy_static! {
    /// Exchange symbols: 1-6 alphanumerics starting with a letter, with an
    /// optional share-class or venue suffix (BRK.B, BF-B).
    static ref TICKER_REGEX: Regex = Regex::new(r"^[A-Z][A-Z0-9]{0,5}([.-][A-Z0-9]{1,3})?$")
        .expect("Invalid regex pattern");

    /// Sector names as they appear in the marts ("Technology", "Oil & Gas").
    static ref SECTOR_REGEX: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z &/-]{0,63}$").expect("Invalid regex pattern");
}

/// An uppercase, validated ticker symbol.
///
/// Construction always goes through [`Ticker::parse`], so a `Ticker` is safe
/// to use as a filter value wherever it ends up.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Trims and upper-cases `raw`, then checks it against the symbol grammar.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_uppercase();
        if TICKER_REGEX.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(Error::Validation(ValidationError::InvalidTicker(
                raw.to_string(),
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks a caller-supplied sector name. Matching against the store is
/// case-insensitive, so the name is returned trimmed but not re-cased.
pub fn validate_sector(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if SECTOR_REGEX.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(Error::Validation(ValidationError::InvalidSector(
            raw.to_string(),
        )))
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        assert_eq!(Ticker::parse("aapl").unwrap().as_str(), "AAPL");
        assert_eq!(Ticker::parse("  Msft ").unwrap().as_str(), "MSFT");
        assert_eq!(Ticker::parse("brk.b").unwrap().as_str(), "BRK.B");
        assert_eq!(Ticker::parse("BF-B").unwrap().as_str(), "BF-B");
    }

    #[test]
    fn parse_rejects_injection_and_junk() {
        for raw in [
            "",
            "1ABC",
            "TOOLONGX",
            "AAPL'; DROP TABLE mart_daily_returns; --",
            "A B",
            "AAPL%",
            "A.",
        ] {
            let err = Ticker::parse(raw).unwrap_err();
            assert!(
                matches!(err, Error::Validation(ValidationError::InvalidTicker(_))),
                "expected InvalidTicker for {raw:?}"
            );
        }
    }

    #[test]
    fn sector_validation() {
        assert_eq!(validate_sector("Technology").unwrap(), "Technology");
        assert_eq!(validate_sector(" oil & gas ").unwrap(), "oil & gas");
        assert!(validate_sector("Tech' OR '1'='1").is_err());
        assert!(validate_sector("").is_err());
        assert!(validate_sector("Tech;").is_err());
    }

    #[test]
    fn serde_goes_through_validation() {
        let t: Ticker = serde_json::from_str("\"nvda\"").unwrap();
        assert_eq!(t.as_str(), "NVDA");
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"NVDA\"");
        assert!(serde_json::from_str::<Ticker>("\"no way\"").is_err());
    }

    proptest! {
        #[test]
        fn parse_is_case_insensitive(s in "[A-Za-z][A-Za-z0-9]{0,5}") {
            let lower = Ticker::parse(&s.to_lowercase()).unwrap();
            let upper = Ticker::parse(&s.to_uppercase()).unwrap();
            prop_assert_eq!(lower, upper);
        }

        #[test]
        fn accepted_tickers_hold_no_quotes_or_separators(s in "\\PC{0,12}") {
            if let Ok(t) = Ticker::parse(&s) {
                prop_assert!(t.as_str().chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-'));
            }
        }
    }
}
