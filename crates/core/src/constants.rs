/// Largest history window served by the query service, in days
pub const MAX_HISTORY_DAYS: u32 = 365;

/// History window used when the caller does not ask for one
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Hard cap on rows returned by the ranking endpoints
pub const MAX_RESULT_LIMIT: u32 = 20;

/// Rows returned by the ranking endpoints when no limit is given
pub const DEFAULT_RESULT_LIMIT: u32 = 5;

/// Default lookback for a daily ingestion run, in days
pub const DEFAULT_LOOKBACK_DAYS: u32 = 1;

/// Default key prefix for per-ticker bar objects
pub const DEFAULT_STOCK_PREFIX: &str = "stock_prices";

/// Default key prefix for fundamentals snapshots
pub const DEFAULT_FUNDAMENTALS_PREFIX: &str = "fundamentals";

/// Timestamp suffix format used in staged object keys
pub const OBJECT_KEY_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Content type of staged objects
pub const CSV_CONTENT_TYPE: &str = "text/csv";
