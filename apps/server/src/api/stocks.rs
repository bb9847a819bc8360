use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResponse, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use stockiq_market_data::{CategorizedMetrics, Overview, Quote};

const MISSING_SYMBOL: &str = "Missing required parameter: symbol";

#[derive(Deserialize)]
pub(crate) struct SymbolQuery {
    symbol: Option<String>,
}

impl SymbolQuery {
    /// The raw `symbol` parameter, rejecting a missing or blank value.
    fn require(&self) -> ApiResult<&str> {
        self.symbol
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest(MISSING_SYMBOL.to_string()))
    }
}

/// Overview as served over HTTP, with ratios keyed by category and provider field name.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OverviewResponse {
    symbol: String,
    name: Option<String>,
    exchange: Option<String>,
    currency: Option<String>,
    country: Option<String>,
    sector: Option<String>,
    industry: Option<String>,
    metrics: CategorizedMetrics,
}

impl From<Overview> for OverviewResponse {
    fn from(overview: Overview) -> Self {
        let metrics = overview.categorized_metrics();
        Self {
            symbol: overview.symbol,
            name: overview.name,
            exchange: overview.exchange,
            currency: overview.currency,
            country: overview.country,
            sector: overview.sector,
            industry: overview.industry,
            metrics,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct EvictResponse {
    symbol: String,
    evicted: bool,
}

/// Live quote; falls back to mock data when the provider cannot answer.
pub(crate) async fn get_quote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SymbolQuery>,
) -> ApiResult<Json<ApiResponse<Quote>>> {
    let symbol = query.require()?;
    let quote = state.stock_service.get_quote(symbol).await?;
    Ok(ApiResponse::ok(quote))
}

async fn get_overview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SymbolQuery>,
) -> ApiResult<Json<ApiResponse<OverviewResponse>>> {
    let symbol = query.require()?;
    let overview = state.stock_service.get_overview(symbol).await?;
    Ok(ApiResponse::ok(overview.into()))
}

async fn list_overviews(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<Vec<OverviewResponse>>>> {
    let overviews = state.stock_service.list_overviews()?;
    Ok(ApiResponse::ok(
        overviews.into_iter().map(OverviewResponse::from).collect(),
    ))
}

async fn evict_overview(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<ApiResponse<EvictResponse>>> {
    if !state.stock_service.evict_overview(&symbol).await? {
        return Err(ApiError::NotFound(format!(
            "No cached overview for {}",
            symbol.trim().to_uppercase()
        )));
    }
    Ok(ApiResponse::ok(EvictResponse {
        symbol: symbol.trim().to_uppercase(),
        evicted: true,
    }))
}

pub(crate) async fn post_stock() -> ApiError {
    ApiError::MethodNotAllowed(
        "POST method not yet implemented. Use GET with ?symbol=TICKER".to_string(),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks/quote", get(get_quote))
        .route("/stocks/overview", get(get_overview))
        .route("/stocks/overviews", get(list_overviews))
        .route("/stocks/overviews/{symbol}", delete(evict_overview))
}
