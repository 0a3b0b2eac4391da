use std::sync::Arc;

use crate::config::Config;
use market_pulse_core::analytics::{AnalyticsService, AnalyticsServiceTrait};
use market_pulse_storage_sqlite::SqliteAnalyticsStore;

pub struct AppState {
    pub analytics_service: Arc<dyn AnalyticsServiceTrait>,
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = &config.analytics_db_path;
    if db_path.exists() {
        tracing::info!("Analytic store in use: {}", db_path.display());
    } else {
        // Reads answer 503 until the store is published.
        tracing::warn!("Analytic store not found at {}", db_path.display());
    }

    let store = Arc::new(SqliteAnalyticsStore::new(db_path.clone()));
    let analytics_service: Arc<dyn AnalyticsServiceTrait> =
        Arc::new(AnalyticsService::new(store));

    Ok(Arc::new(AppState { analytics_service }))
}
