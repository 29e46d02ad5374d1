//! HTTP routes.
//!
//! Every handler is stateless with respect to other requests: it asks one provider
//! for a fresh payload, wraps it in the `success` envelope and returns it.
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::HeaderValue,
    routing::get,
};
use chrono::Utc;
use log::{info, warn};
use market_common::Result;
use market_common::api::{ApiResponse, HealthStatus, MarketOverview, SearchResults, TickerTape};
use market_common::net::{
    HEALTH_ROUTE, MARKET_OVERVIEW_ROUTE, STOCK_DATA_ROUTE, STOCK_SEARCH_ROUTE, TICKER_ROUTE,
};
use market_common::snapshot::StockSnapshot;
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::model::market_overview::MarketOverviewProvider;
use crate::model::quote_source::SyntheticRandomSource;
use crate::model::stock_data::StockDataProvider;
use crate::model::stock_search::StockSearchProvider;
use crate::model::ticker_tape::TickerTapeProvider;

/// Providers shared by all handlers.
pub struct AppState {
    /// Index cards.
    pub overview: MarketOverviewProvider,
    /// Stock snapshots.
    pub stock_data: StockDataProvider,
    /// Catalog search.
    pub search: StockSearchProvider,
    /// Ticker tape.
    pub ticker: TickerTapeProvider,
}

impl AppState {
    /// Wires the providers described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let search = match &config.catalog {
            Some(path) => StockSearchProvider::from_file(path)?,
            None => StockSearchProvider::default(),
        };
        Ok(Self {
            overview: MarketOverviewProvider::with_default_indices(),
            stock_data: StockDataProvider::new(Arc::new(SyntheticRandomSource::new(
                config.generation,
            ))),
            search,
            ticker: TickerTapeProvider::default(),
        })
    }
}

/// Raw query string pairs; a repeated key keeps its first value.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// First value given for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

async fn market_overview(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<MarketOverview>>> {
    let overview = state.overview.overview().map_err(ApiError::MarketOverview)?;
    Ok(Json(ApiResponse::ok(overview)))
}

async fn stock_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<ApiResponse<StockSnapshot>>> {
    let symbol = params.first("symbol");
    info!("Stock data requested for {:?}", symbol);
    let snapshot = state
        .stock_data
        .snapshot(symbol, params.first("period"))
        .map_err(ApiError::StockData)?;
    Ok(Json(ApiResponse::ok(snapshot)))
}

async fn stock_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<ApiResponse<SearchResults>>> {
    let q = params.first("q").unwrap_or_default();
    info!("Stock search for {:?}", q);
    let results = state.search.search(q).map_err(ApiError::Search)?;
    Ok(Json(ApiResponse::ok(results)))
}

async fn ticker(State(state): State<Arc<AppState>>) -> ApiResult<Json<ApiResponse<TickerTape>>> {
    let tape = state.ticker.tape().map_err(ApiError::Ticker)?;
    Ok(Json(ApiResponse::ok(tape)))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: String::from("healthy"),
        service: String::from("market_server"),
        timestamp: Utc::now().to_rfc3339(),
        version: String::from(env!("CARGO_PKG_VERSION")),
        mode: String::from("demo"),
        data_sources: vec![
            String::from(state.overview.source_name()),
            String::from(state.stock_data.source_name()),
            String::from(state.ticker.source_name()),
        ],
        available_symbols: state.search.symbols().unwrap_or_else(|e| {
            warn!("Catalog unavailable for health report: {}", e);
            Vec::new()
        }),
    })
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn cors_layer(cors_allow: &[String]) -> CorsLayer {
    if cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", o, e);
                None
            }
        })
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

/// Router exposing every route over `state`.
pub fn app_router(state: Arc<AppState>, cors_allow: &[String]) -> Router {
    Router::new()
        .route(MARKET_OVERVIEW_ROUTE, get(market_overview))
        .route(STOCK_DATA_ROUTE, get(stock_data))
        .route(STOCK_SEARCH_ROUTE, get(stock_search))
        .route(TICKER_ROUTE, get(ticker))
        .route(HEALTH_ROUTE, get(health))
        .fallback(not_found)
        .layer(cors_layer(cors_allow))
        .with_state(state)
}
