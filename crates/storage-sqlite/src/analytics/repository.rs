use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;
use log::debug;

use super::model::{
    HistoryPointDB, MoverDB, SectorSnapshotDB, TickerSectorDB, TickerSnapshotDB,
    VolatileTickerDB,
};
use crate::db::open_read_only;
use crate::errors::StorageError;
use market_pulse_core::analytics::{
    AnalyticsStore, HistoryPoint, MoveDirection, Mover, SectorSnapshot, TickerSector,
    TickerSnapshot, VolatileTicker,
};
use market_pulse_core::errors::{Error, Result};
use market_pulse_core::universe::Ticker;

const LIST_TICKERS_SQL: &str = "
    SELECT DISTINCT ticker, sector
    FROM mart_daily_returns
    ORDER BY sector, ticker";

const LATEST_TICKER_SQL: &str = "
    SELECT
        r.ticker,
        m.company_name,
        r.sector,
        r.trade_date,
        r.close_price,
        r.daily_return_pct,
        r.cumulative_return_pct,
        m.ma_7_day,
        m.ma_30_day,
        m.ma_90_day,
        m.volatility_30_day,
        m.trend_signal,
        m.pct_above_ma_30
    FROM mart_daily_returns r
    LEFT JOIN mart_moving_averages m
        ON r.ticker = m.ticker AND r.trade_date = m.trade_date
    WHERE r.ticker = ?
      AND r.trade_date = (SELECT MAX(trade_date) FROM mart_daily_returns WHERE ticker = ?)
    LIMIT 1";

const TICKER_HISTORY_SQL: &str = "
    SELECT
        r.trade_date,
        r.close_price,
        r.daily_return_pct,
        r.cumulative_return_pct,
        m.ma_7_day,
        m.ma_30_day,
        m.ma_90_day,
        m.volatility_30_day,
        m.trend_signal
    FROM mart_daily_returns r
    LEFT JOIN mart_moving_averages m
        ON r.ticker = m.ticker AND r.trade_date = m.trade_date
    WHERE r.ticker = ?
    ORDER BY r.trade_date DESC
    LIMIT ?";

const LATEST_SECTOR_SQL: &str = "
    SELECT
        sector,
        trade_month_start,
        avg_daily_return_pct,
        avg_volatility,
        company_count,
        sector_rank_by_return
    FROM mart_sector_performance
    WHERE UPPER(sector) = UPPER(?)
      AND trade_month_start = (
          SELECT MAX(trade_month_start)
          FROM mart_sector_performance
          WHERE UPPER(sector) = UPPER(?)
      )
    LIMIT 1";

const LATEST_SECTORS_SQL: &str = "
    SELECT
        sector,
        trade_month_start,
        avg_daily_return_pct,
        avg_volatility,
        company_count,
        sector_rank_by_return
    FROM mart_sector_performance
    WHERE trade_month_start = (SELECT MAX(trade_month_start) FROM mart_sector_performance)
    ORDER BY sector_rank_by_return, sector";

// Gainers and losers use mirrored sort keys so one is the exact reverse of
// the other, ties included. Rows without a value are not ranked.
const TOP_GAINERS_SQL: &str = "
    SELECT ticker, sector, close_price, daily_return_pct, cumulative_return_pct
    FROM mart_daily_returns
    WHERE trade_date = (SELECT MAX(trade_date) FROM mart_daily_returns)
      AND daily_return_pct IS NOT NULL
    ORDER BY daily_return_pct DESC, ticker ASC
    LIMIT ?";

const TOP_LOSERS_SQL: &str = "
    SELECT ticker, sector, close_price, daily_return_pct, cumulative_return_pct
    FROM mart_daily_returns
    WHERE trade_date = (SELECT MAX(trade_date) FROM mart_daily_returns)
      AND daily_return_pct IS NOT NULL
    ORDER BY daily_return_pct ASC, ticker DESC
    LIMIT ?";

const MOST_VOLATILE_SQL: &str = "
    SELECT ticker, sector, close_price, volatility_30_day, trend_signal
    FROM mart_moving_averages
    WHERE trade_date = (SELECT MAX(trade_date) FROM mart_moving_averages)
      AND volatility_30_day IS NOT NULL
    ORDER BY volatility_30_day DESC, ticker ASC
    LIMIT ?";

/// Reads the marts from a SQLite file, opening a fresh read-only connection
/// for every call.
pub struct SqliteAnalyticsStore {
    db_path: Arc<PathBuf>,
}

impl SqliteAnalyticsStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    /// Runs `job` on a blocking thread with its own connection. The
    /// connection is dropped when the job returns, on every path.
    async fn with_connection<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        tokio::task::spawn_blocking(move || {
            let mut conn = open_read_only(&db_path)?;
            job(&mut conn)
        })
        .await
        .map_err(|e| Error::Unexpected(format!("Analytic store task failed: {}", e)))?
    }
}

fn limit_param(limit: u32) -> i64 {
    i64::from(limit)
}

#[async_trait]
impl AnalyticsStore for SqliteAnalyticsStore {
    async fn ping(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.batch_execute("SELECT 1;").map_err(StorageError::from)?;
            Ok(())
        })
        .await
    }

    async fn list_tickers(&self) -> Result<Vec<TickerSector>> {
        self.with_connection(|conn| {
            let rows = sql_query(LIST_TICKERS_SQL)
                .load::<TickerSectorDB>(conn)
                .map_err(StorageError::from)?;
            Ok(rows.into_iter().map(TickerSector::from).collect())
        })
        .await
    }

    async fn latest_ticker_snapshot(&self, ticker: &Ticker) -> Result<Option<TickerSnapshot>> {
        let ticker = ticker.to_string();
        self.with_connection(move |conn| {
            debug!("Loading latest snapshot for {}", ticker);
            let row = sql_query(LATEST_TICKER_SQL)
                .bind::<Text, _>(ticker.clone())
                .bind::<Text, _>(ticker)
                .get_result::<TickerSnapshotDB>(conn)
                .optional()
                .map_err(StorageError::from)?;
            row.map(TickerSnapshot::try_from)
                .transpose()
                .map_err(Error::from)
        })
        .await
    }

    async fn ticker_history(&self, ticker: &Ticker, days: u32) -> Result<Vec<HistoryPoint>> {
        let ticker = ticker.to_string();
        self.with_connection(move |conn| {
            debug!("Loading {} history rows for {}", days, ticker);
            let rows = sql_query(TICKER_HISTORY_SQL)
                .bind::<Text, _>(ticker)
                .bind::<BigInt, _>(limit_param(days))
                .load::<HistoryPointDB>(conn)
                .map_err(StorageError::from)?;
            rows.into_iter()
                .map(|r| HistoryPoint::try_from(r).map_err(Error::from))
                .collect()
        })
        .await
    }

    async fn latest_sector_snapshot(&self, sector: &str) -> Result<Option<SectorSnapshot>> {
        let sector = sector.to_string();
        self.with_connection(move |conn| {
            let row = sql_query(LATEST_SECTOR_SQL)
                .bind::<Text, _>(sector.clone())
                .bind::<Text, _>(sector)
                .get_result::<SectorSnapshotDB>(conn)
                .optional()
                .map_err(StorageError::from)?;
            row.map(SectorSnapshot::try_from)
                .transpose()
                .map_err(Error::from)
        })
        .await
    }

    async fn latest_sector_snapshots(&self) -> Result<Vec<SectorSnapshot>> {
        self.with_connection(|conn| {
            let rows = sql_query(LATEST_SECTORS_SQL)
                .load::<SectorSnapshotDB>(conn)
                .map_err(StorageError::from)?;
            rows.into_iter()
                .map(|r| SectorSnapshot::try_from(r).map_err(Error::from))
                .collect()
        })
        .await
    }

    async fn top_movers(&self, direction: MoveDirection, limit: u32) -> Result<Vec<Mover>> {
        let sql = match direction {
            MoveDirection::Gainers => TOP_GAINERS_SQL,
            MoveDirection::Losers => TOP_LOSERS_SQL,
        };
        self.with_connection(move |conn| {
            let rows = sql_query(sql)
                .bind::<BigInt, _>(limit_param(limit))
                .load::<MoverDB>(conn)
                .map_err(StorageError::from)?;
            Ok(rows.into_iter().map(Mover::from).collect())
        })
        .await
    }

    async fn most_volatile(&self, limit: u32) -> Result<Vec<VolatileTicker>> {
        self.with_connection(move |conn| {
            let rows = sql_query(MOST_VOLATILE_SQL)
                .bind::<BigInt, _>(limit_param(limit))
                .load::<VolatileTickerDB>(conn)
                .map_err(StorageError::from)?;
            Ok(rows.into_iter().map(VolatileTicker::from).collect())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MART_SCHEMA_SQL;
    use market_pulse_core::errors::DatabaseError;
    use std::collections::HashSet;
    use tempfile::TempDir;

    const SEED_SQL: &str = r#"
        INSERT INTO mart_daily_returns VALUES
            ('AAPL', 'Technology', '2024-03-14', 170.0, NULL,  10.0),
            ('AAPL', 'Technology', '2024-03-15', 172.0, 1.18,  11.3),
            ('MSFT', 'Technology', '2024-03-14', 410.0, 0.2,   20.1),
            ('MSFT', 'Technology', '2024-03-15', 415.0, 1.22,  21.6),
            ('JPM',  'Financials', '2024-03-15', 190.0, -0.8,   5.0),
            ('XOM',  'Energy',     '2024-03-15', 112.0, -2.1,  -3.4),
            ('CVX',  'Energy',     '2024-03-15', 155.0, 0.0,    1.2),
            ('GE',   'Industrials','2024-03-15', 170.0, 3.4,   40.0),
            ('NEWCO','Technology', '2024-03-15', 10.0,  NULL,  NULL);

        INSERT INTO mart_moving_averages VALUES
            ('AAPL', 'Technology', 'Apple Inc.', '2024-03-15', 172.0, 171.0, 175.5, 182.0, 1.4, 'BEARISH', -1.99),
            ('MSFT', 'Technology', 'Microsoft',  '2024-03-15', 415.0, 412.0, 405.0, 390.0, 1.1, 'BULLISH', 2.47),
            ('JPM',  'Financials', 'JPMorgan',   '2024-03-15', 190.0, 189.0, 185.0, 178.0, 0.9, 'bullish', 2.70),
            ('XOM',  'Energy',     'Exxon',      '2024-03-15', 112.0, 113.0, 115.0, 110.0, 2.3, 'BEARISH', -2.61),
            ('GE',   'Industrials','GE',         '2024-03-15', 170.0, 165.0, 160.0, 150.0, 2.8, 'SIDEWAYS', 6.25),
            ('AAPL', 'Technology', 'Apple Inc.', '2024-03-01', 179.0, 180.0, 184.0, 185.0, 9.9, 'BEARISH', -2.7),
            ('NEWCO','Technology', 'NewCo',      '2024-03-15', 10.0,  NULL,  NULL,  NULL,  NULL, NULL, NULL);

        INSERT INTO mart_sector_performance VALUES
            ('Technology',  '2024-02-01', 0.30, 1.2, 2, 1),
            ('Technology',  '2024-03-01', 0.15, 1.3, 2, 2),
            ('Energy',      '2024-03-01', -0.7, 2.4, 2, 4),
            ('Industrials', '2024-03-01', 0.50, 2.8, 1, 1),
            ('Financials',  '2024-03-01', 0.05, 0.9, 1, 3);
    "#;

    fn seeded_store() -> (TempDir, SqliteAnalyticsStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.db");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(MART_SCHEMA_SQL).unwrap();
        conn.execute_batch(SEED_SQL).unwrap();
        (dir, SqliteAnalyticsStore::new(path))
    }

    fn ticker(s: &str) -> Ticker {
        Ticker::parse(s).unwrap()
    }

    #[tokio::test]
    async fn ping_succeeds_on_existing_store() {
        let (_dir, store) = seeded_store();
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn ping_fails_as_unavailable_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteAnalyticsStore::new(dir.path().join("missing.db"));

        let err = store.ping().await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn tickers_are_distinct_and_sorted_by_sector_then_ticker() {
        let (_dir, store) = seeded_store();

        let rows = store.list_tickers().await.unwrap();
        let pairs: Vec<(String, String)> =
            rows.into_iter().map(|r| (r.sector, r.ticker)).collect();
        assert_eq!(
            pairs,
            vec![
                ("Energy".to_string(), "CVX".to_string()),
                ("Energy".to_string(), "XOM".to_string()),
                ("Financials".to_string(), "JPM".to_string()),
                ("Industrials".to_string(), "GE".to_string()),
                ("Technology".to_string(), "AAPL".to_string()),
                ("Technology".to_string(), "MSFT".to_string()),
                ("Technology".to_string(), "NEWCO".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn latest_snapshot_joins_moving_averages() {
        let (_dir, store) = seeded_store();

        let snap = store
            .latest_ticker_snapshot(&ticker("AAPL"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snap.trade_date.to_string(), "2024-03-15");
        assert_eq!(snap.company_name.as_deref(), Some("Apple Inc."));
        assert_eq!(snap.daily_return_pct, Some(1.18));
        assert_eq!(snap.ma_30_day, Some(175.5));
        assert_eq!(
            snap.trend_signal,
            Some(market_pulse_core::analytics::TrendSignal::Bearish)
        );
    }

    #[tokio::test]
    async fn snapshot_without_moving_average_row_has_gaps() {
        let (_dir, store) = seeded_store();

        let snap = store
            .latest_ticker_snapshot(&ticker("CVX"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snap.company_name, None);
        assert_eq!(snap.ma_7_day, None);
        assert_eq!(snap.trend_signal, None);
    }

    #[tokio::test]
    async fn unknown_ticker_yields_no_row() {
        let (_dir, store) = seeded_store();
        assert!(store
            .latest_ticker_snapshot(&ticker("ZZZZ"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_limited() {
        let (_dir, store) = seeded_store();

        let all = store.ticker_history(&ticker("AAPL"), 365).await.unwrap();
        let dates: Vec<String> = all.iter().map(|p| p.trade_date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-15", "2024-03-14"]);
        assert_eq!(all[1].daily_return_pct, None);

        let one = store.ticker_history(&ticker("AAPL"), 1).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].trade_date.to_string(), "2024-03-15");
    }

    #[tokio::test]
    async fn sector_match_is_case_insensitive_and_latest_month() {
        let (_dir, store) = seeded_store();

        let snap = store
            .latest_sector_snapshot("TECHNOLOGY")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snap.sector, "Technology");
        assert_eq!(snap.trade_month_start.to_string(), "2024-03-01");
        assert_eq!(snap.sector_rank_by_return, 2);

        assert!(store
            .latest_sector_snapshot("Utilities")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn sectors_are_latest_month_ordered_by_rank() {
        let (_dir, store) = seeded_store();

        let sectors = store.latest_sector_snapshots().await.unwrap();
        let ranked: Vec<(i64, &str)> = sectors
            .iter()
            .map(|s| (s.sector_rank_by_return, s.sector.as_str()))
            .collect();
        assert_eq!(
            ranked,
            vec![
                (1, "Industrials"),
                (2, "Technology"),
                (3, "Financials"),
                (4, "Energy")
            ]
        );
    }

    #[tokio::test]
    async fn gainers_and_losers_are_mirror_images() {
        let (_dir, store) = seeded_store();

        let gainers = store.top_movers(MoveDirection::Gainers, 20).await.unwrap();
        let mut losers = store.top_movers(MoveDirection::Losers, 20).await.unwrap();
        losers.reverse();
        assert_eq!(gainers, losers);

        let top: Vec<&str> = gainers.iter().map(|m| m.ticker.as_str()).collect();
        assert_eq!(top, vec!["GE", "MSFT", "AAPL", "CVX", "JPM", "XOM"]);
    }

    #[tokio::test]
    async fn small_limits_give_disjoint_ends() {
        let (_dir, store) = seeded_store();

        let gainers = store.top_movers(MoveDirection::Gainers, 2).await.unwrap();
        let losers = store.top_movers(MoveDirection::Losers, 2).await.unwrap();
        let g: HashSet<String> = gainers.into_iter().map(|m| m.ticker).collect();
        let l: HashSet<String> = losers.into_iter().map(|m| m.ticker).collect();
        assert!(g.is_disjoint(&l));
        assert_eq!(l, HashSet::from(["XOM".to_string(), "JPM".to_string()]));
    }

    #[tokio::test]
    async fn rows_without_a_return_are_not_ranked() {
        let (_dir, store) = seeded_store();

        let losers = store.top_movers(MoveDirection::Losers, 2).await.unwrap();
        assert_eq!(losers[0].ticker, "XOM");
        assert_eq!(losers[0].daily_return_pct, Some(-2.1));

        let gainers = store.top_movers(MoveDirection::Gainers, 20).await.unwrap();
        assert!(gainers.iter().all(|m| m.ticker != "NEWCO"));

        let volatile = store.most_volatile(20).await.unwrap();
        assert!(volatile.iter().all(|v| v.volatility_30_day.is_some()));
        assert!(volatile.iter().all(|v| v.ticker != "NEWCO"));
    }

    #[tokio::test]
    async fn most_volatile_reads_latest_day() {
        let (_dir, store) = seeded_store();

        let rows = store.most_volatile(3).await.unwrap();
        let tickers: Vec<&str> = rows.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["GE", "XOM", "AAPL"]);
        assert_eq!(
            rows[0].trend_signal,
            Some(market_pulse_core::analytics::TrendSignal::Other("SIDEWAYS".to_string()))
        );
        assert_eq!(rows[2].volatility_30_day, Some(1.4));
    }

    #[tokio::test]
    async fn missing_tables_are_query_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (x INTEGER);")
            .unwrap();
        let store = SqliteAnalyticsStore::new(path);

        let err = store.list_tickers().await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::QueryFailed(_))));
    }

    #[tokio::test]
    async fn hostile_filter_values_are_bound_not_spliced() {
        let (_dir, store) = seeded_store();

        assert!(store
            .latest_sector_snapshot("Technology' OR '1'='1")
            .await
            .unwrap()
            .is_none());
    }
}
