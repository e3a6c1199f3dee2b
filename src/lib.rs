//! Hire scheduling service.
//!
//! Prices hired products by the number of whole days between a start and an
//! end date, and serves the three hooks a shop calls to keep that price
//! consistent: the product page preview, the cart totals pass and the order
//! line finalization.

use axum::{
    extract::{Path as UrlPath, State},
    routing::{delete, get},
    Json, Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hire;

use cache::{AppCache, CacheStats};
use catalog::Catalog;
use hire::format::PriceFormat;
use hire::responses::{AjaxResponse, HealthResponse};
use hire::HirePricer;

/// Shared state for every request
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub cache: AppCache,
    pub pricer: HirePricer,
    pub price_format: Arc<PriceFormat>,
}

impl AppState {
    /// The pricer rounds to the same precision the prices are displayed at.
    pub fn new(catalog: Catalog, cache: AppCache, price_format: PriceFormat) -> Self {
        Self {
            catalog,
            cache,
            pricer: HirePricer::new(price_format.decimals),
            price_format: Arc::new(price_format),
        }
    }
}

/// Build the application router
pub fn app(state: AppState, assets_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cache", delete(clear_cache))
        .route("/cache/products/:id", delete(clear_cached_product))
        .merge(hire::router())
        .nest_service("/assets", ServeDir::new(assets_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.cache.stats(),
    })
}

/// Drop every cached product
async fn clear_cache(State(state): State<AppState>) -> Json<AjaxResponse<CacheStats>> {
    state.cache.invalidate_all();
    Json(AjaxResponse::success(state.cache.stats()))
}

/// Drop one cached product so its next pricing pass reads the catalog
async fn clear_cached_product(
    State(state): State<AppState>,
    UrlPath(product_id): UrlPath<i64>,
) -> Json<AjaxResponse<CacheStats>> {
    state.cache.invalidate_product(product_id).await;
    Json(AjaxResponse::success(state.cache.stats()))
}
