use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use market_pulse_core::analytics::MoveDirection;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{
        LimitQuery, MostVolatileResponse, Mover, TopGainersResponse, TopLosersResponse,
        VolatileTicker,
    },
};

async fn movers(
    state: &AppState,
    direction: MoveDirection,
    limit: Option<u32>,
) -> ApiResult<Vec<Mover>> {
    Ok(state
        .analytics_service
        .top_movers(direction, limit)
        .await?
        .into_iter()
        .map(Mover::from)
        .collect())
}

/// Top gaining tickers on the latest trading day.
#[utoipa::path(
    get,
    path = "/api/v1/top-gainers",
    tag = "Market",
    params(("limit" = Option<u32>, Query, description = "Rows to return (default 5, max 20)")),
    responses((status = 200, body = TopGainersResponse))
)]
pub async fn top_gainers(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<Json<TopGainersResponse>> {
    let Query(query) = query?;
    let rows = movers(&state, MoveDirection::Gainers, query.limit).await?;
    Ok(Json(TopGainersResponse {
        count: rows.len(),
        top_gainers: rows,
    }))
}

/// Top losing tickers on the latest trading day.
#[utoipa::path(
    get,
    path = "/api/v1/top-losers",
    tag = "Market",
    params(("limit" = Option<u32>, Query, description = "Rows to return (default 5, max 20)")),
    responses((status = 200, body = TopLosersResponse))
)]
pub async fn top_losers(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<Json<TopLosersResponse>> {
    let Query(query) = query?;
    let rows = movers(&state, MoveDirection::Losers, query.limit).await?;
    Ok(Json(TopLosersResponse {
        count: rows.len(),
        top_losers: rows,
    }))
}

/// Most volatile tickers by 30-day volatility on the latest trading day.
#[utoipa::path(
    get,
    path = "/api/v1/most-volatile",
    tag = "Market",
    params(("limit" = Option<u32>, Query, description = "Rows to return (default 5, max 20)")),
    responses((status = 200, body = MostVolatileResponse))
)]
pub async fn most_volatile(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<Json<MostVolatileResponse>> {
    let Query(query) = query?;
    let rows: Vec<VolatileTicker> = state
        .analytics_service
        .most_volatile(query.limit)
        .await?
        .into_iter()
        .map(VolatileTicker::from)
        .collect();
    Ok(Json(MostVolatileResponse {
        count: rows.len(),
        most_volatile: rows,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/top-gainers", get(top_gainers))
        .route("/top-losers", get(top_losers))
        .route("/most-volatile", get(most_volatile))
}
