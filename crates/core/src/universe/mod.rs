//! Tickers and the fixed universe the pipeline tracks.

mod ticker;
mod universe_model;

pub use ticker::{validate_sector, Ticker};
pub use universe_model::{Universe, UNIVERSE_TICKERS};
