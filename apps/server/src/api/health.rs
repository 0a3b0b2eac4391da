use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::HealthResponse,
};

/// Check API health and analytic store connectivity.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "System",
    responses(
        (status = 200, body = HealthResponse),
        (status = 503, description = "Analytic store unreachable")
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    state
        .analytics_service
        .check_health()
        .await
        .map_err(|e| ApiError::Unavailable(format!("Analytics store unavailable: {}", e)))?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}
