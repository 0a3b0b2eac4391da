use super::Ticker;
use crate::errors::Result;

/// The curated symbols tracked by the pipeline, grouped by sector.
pub const UNIVERSE_TICKERS: [&str; 30] = [
    // Technology
    "AAPL", "MSFT", "GOOGL", "META", "NVDA",
    // Financials
    "JPM", "BAC", "GS", "WFC", "V",
    // Healthcare
    "JNJ", "PFE", "UNH", "ABBV", "MRK",
    // Consumer
    "AMZN", "TSLA", "WMT", "HD", "MCD",
    // Energy
    "XOM", "CVX", "COP", "SLB", "EOG",
    // Industrials
    "CAT", "BA", "GE", "MMM", "HON",
];

/// A fixed, ordered set of tickers. Iteration order is sorted and stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    tickers: Vec<Ticker>,
}

impl Universe {
    /// Builds a universe from raw symbols, rejecting the whole set if any
    /// symbol is malformed. Duplicates collapse.
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tickers = symbols
            .into_iter()
            .map(|s| Ticker::parse(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        tickers.sort();
        tickers.dedup();
        Ok(Self { tickers })
    }

    /// The compiled-in universe.
    pub fn standard() -> Self {
        let mut tickers: Vec<Ticker> = UNIVERSE_TICKERS
            .iter()
            .filter_map(|s| Ticker::parse(s).ok())
            .collect();
        tickers.sort();
        tickers.dedup();
        Self { tickers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticker> {
        self.tickers.iter()
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::standard()
    }
}
