use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{SectorListResponse, SectorResponse},
};

/// Latest month's performance for one sector, matched case-insensitively.
#[utoipa::path(
    get,
    path = "/api/v1/sector/{sector}",
    tag = "Sectors",
    params(("sector" = String, Path, description = "Sector name, e.g. Technology")),
    responses(
        (status = 200, body = SectorResponse),
        (status = 404, description = "Sector not found")
    )
)]
pub async fn get_sector(
    State(state): State<Arc<AppState>>,
    Path(sector): Path<String>,
) -> ApiResult<Json<SectorResponse>> {
    let snapshot = state.analytics_service.get_sector(&sector).await?;
    Ok(Json(SectorResponse::from(snapshot)))
}

/// Every sector's latest-month snapshot, ordered by rank.
#[utoipa::path(get, path = "/api/v1/sectors", tag = "Sectors", responses((status = 200, body = SectorListResponse)))]
pub async fn list_sectors(State(state): State<Arc<AppState>>) -> ApiResult<Json<SectorListResponse>> {
    let sectors: Vec<SectorResponse> = state
        .analytics_service
        .list_sectors()
        .await?
        .into_iter()
        .map(SectorResponse::from)
        .collect();
    Ok(Json(SectorListResponse {
        count: sectors.len(),
        sectors,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sector/{sector}", get(get_sector))
        .route("/sectors", get(list_sectors))
}
