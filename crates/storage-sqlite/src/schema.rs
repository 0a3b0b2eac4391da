//! Shape of the mart tables this crate reads.
//!
//! The marts are produced by the external transformation job; this DDL is
//! the read contract, used to stand up local stores and test fixtures.
//! Dates are ISO-8601 text (`YYYY-MM-DD`).

pub const MART_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS mart_daily_returns (
    ticker                 TEXT NOT NULL,
    sector                 TEXT NOT NULL,
    trade_date             TEXT NOT NULL,
    close_price            REAL NOT NULL,
    daily_return_pct       REAL,
    cumulative_return_pct  REAL,
    PRIMARY KEY (ticker, trade_date)
);

CREATE TABLE IF NOT EXISTS mart_moving_averages (
    ticker             TEXT NOT NULL,
    sector             TEXT NOT NULL,
    company_name       TEXT,
    trade_date         TEXT NOT NULL,
    close_price        REAL NOT NULL,
    ma_7_day           REAL,
    ma_30_day          REAL,
    ma_90_day          REAL,
    volatility_30_day  REAL,
    trend_signal       TEXT,
    pct_above_ma_30    REAL,
    PRIMARY KEY (ticker, trade_date)
);

CREATE TABLE IF NOT EXISTS mart_sector_performance (
    sector                 TEXT NOT NULL,
    trade_month_start      TEXT NOT NULL,
    avg_daily_return_pct   REAL,
    avg_volatility         REAL,
    company_count          INTEGER NOT NULL,
    sector_rank_by_return  INTEGER NOT NULL,
    PRIMARY KEY (sector, trade_month_start)
);
"#;
