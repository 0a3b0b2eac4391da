use std::sync::Arc;

use anyhow::Context;
use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{config::Config, main_lib::AppState, models};

mod health;
mod market;
mod sectors;
mod tickers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Market Pulse API", description = "Stock analytics over the Market Pulse marts"),
    paths(
        health::health_check,
        tickers::list_tickers,
        tickers::get_ticker,
        tickers::get_ticker_history,
        sectors::get_sector,
        sectors::list_sectors,
        market::top_gainers,
        market::top_losers,
        market::most_volatile,
    ),
    components(schemas(
        models::HealthResponse,
        models::TickerSector,
        models::TickerListResponse,
        models::TickerResponse,
        models::HistoryPoint,
        models::TickerHistoryResponse,
        models::SectorResponse,
        models::SectorListResponse,
        models::Mover,
        models::TopGainersResponse,
        models::TopLosersResponse,
        models::VolatileTicker,
        models::MostVolatileResponse,
    )),
    tags((name = "System"), (name = "Stocks"), (name = "Sectors"), (name = "Market"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let layer = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };
    Ok(layer.allow_methods(Any).allow_headers(Any))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = cors_layer(config)?;
    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .merge(health::router())
        .merge(tickers::router())
        .merge(sectors::router())
        .merge(market::router())
        .route("/openapi.json", get(|| async { Json(openapi) }));

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
}
