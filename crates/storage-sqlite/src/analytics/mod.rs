//! SQLite implementation of the analytic store reads.

mod model;
mod repository;

pub use model::{
    HistoryPointDB, MoverDB, SectorSnapshotDB, TickerSectorDB, TickerSnapshotDB,
    VolatileTickerDB,
};
pub use repository::SqliteAnalyticsStore;
