//! Core error types for Market Pulse.
//!
//! This module defines storage- and vendor-agnostic error types. Storage
//! specific errors (Diesel, SQLite) are converted to these types by the
//! storage layer; object-store errors by the staging layer.

use thiserror::Error;

pub use market_pulse_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("Staging failed: {0}")]
    Staging(#[from] StagingError),

    #[error("Invalid configuration value: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for analytic store reads.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The analytic store could not be reached or opened.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A query failed to execute or returned rows that could not be decoded.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for caller input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid ticker symbol: '{0}'")]
    InvalidTicker(String),

    #[error("Invalid sector name: '{0}'")]
    InvalidSector(String),
}

/// Errors raised while encoding or writing staged objects.
#[derive(Error, Debug)]
pub enum StagingError {
    #[error("Failed to encode CSV: {0}")]
    Encode(String),

    #[error("Failed to write object '{key}': {message}")]
    WriteFailed { key: String, message: String },

    #[error("Object '{0}' already exists")]
    AlreadyExists(String),
}

impl Error {
    /// True when the store itself is unavailable, as opposed to a failing query.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::ConnectionFailed(_)))
    }
}

// === From implementations for common error types ===

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Staging(StagingError::Encode(err.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_bare_message() {
        let err = Error::NotFound("Ticker 'ZZZZ' not found".to_string());
        assert_eq!(err.to_string(), "Ticker 'ZZZZ' not found");
    }

    #[test]
    fn connection_failure_is_unavailable() {
        let err: Error = DatabaseError::ConnectionFailed("no such file".into()).into();
        assert!(err.is_unavailable());

        let err: Error = DatabaseError::QueryFailed("syntax error".into()).into();
        assert!(!err.is_unavailable());
    }

    #[test]
    fn market_data_errors_convert() {
        let err: Error = MarketDataError::SymbolNotFound("ZZZZ".into()).into();
        assert!(matches!(err, Error::MarketData(_)));
    }
}
