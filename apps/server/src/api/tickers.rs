use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{HistoryQuery, TickerHistoryResponse, TickerListResponse, TickerResponse, TickerSector},
};

/// All tickers with their sectors, sorted by sector then ticker.
#[utoipa::path(get, path = "/api/v1/tickers", tag = "Stocks", responses((status = 200, body = TickerListResponse)))]
pub async fn list_tickers(State(state): State<Arc<AppState>>) -> ApiResult<Json<TickerListResponse>> {
    let tickers: Vec<TickerSector> = state
        .analytics_service
        .list_tickers()
        .await?
        .into_iter()
        .map(TickerSector::from)
        .collect();
    Ok(Json(TickerListResponse {
        count: tickers.len(),
        tickers,
    }))
}

/// Latest analytics for one ticker. The symbol is case-insensitive.
#[utoipa::path(
    get,
    path = "/api/v1/ticker/{ticker}",
    tag = "Stocks",
    params(("ticker" = String, Path, description = "Ticker symbol, e.g. AAPL")),
    responses(
        (status = 200, body = TickerResponse),
        (status = 400, description = "Malformed ticker"),
        (status = 404, description = "Ticker not found")
    )
)]
pub async fn get_ticker(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> ApiResult<Json<TickerResponse>> {
    let snapshot = state.analytics_service.get_ticker(&ticker).await?;
    Ok(Json(TickerResponse::from(snapshot)))
}

/// Most recent `days` rows for a ticker, newest first. `days` above 365 is clamped.
#[utoipa::path(
    get,
    path = "/api/v1/ticker/{ticker}/history",
    tag = "Stocks",
    params(
        ("ticker" = String, Path, description = "Ticker symbol"),
        ("days" = Option<u32>, Query, description = "Trading days to return (default 30, max 365)")
    ),
    responses(
        (status = 200, body = TickerHistoryResponse),
        (status = 400, description = "Malformed ticker or days"),
        (status = 404, description = "Ticker not found")
    )
)]
pub async fn get_ticker_history(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Json<TickerHistoryResponse>> {
    let Query(query) = query?;
    let history = state
        .analytics_service
        .get_ticker_history(&ticker, query.days)
        .await?;
    Ok(Json(TickerHistoryResponse::from(history)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tickers", get(list_tickers))
        .route("/ticker/{ticker}", get(get_ticker))
        .route("/ticker/{ticker}/history", get(get_ticker_history))
}
