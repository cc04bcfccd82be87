//! Renovation budget endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use renovation_estimator::{
    catalog, catalog_estimate, estimate, CatalogEntry, CatalogItem, RenovationEstimate,
    RenovationLineItem,
};
use serde::{Deserialize, Serialize};

use crate::{record_history, ApiResponse, AppError, AppJson, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub items: Vec<RenovationLineItem>,
    /// Contingency on top of the subtotal, in percent. Default 10.
    #[serde(default)]
    pub contingency_percent: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogEstimateRequest {
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub contingency_percent: Option<f64>,
}

pub fn renovation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/calculators/renovation/estimate",
            post(renovation_estimate),
        )
        .route(
            "/api/calculators/renovation/catalog-estimate",
            post(renovation_catalog_estimate),
        )
        .route(
            "/api/calculators/renovation/catalog",
            get(renovation_catalog),
        )
}

async fn renovation_estimate(
    State(state): State<AppState>,
    AppJson(request): AppJson<EstimateRequest>,
) -> Result<Json<ApiResponse<RenovationEstimate>>, AppError> {
    let result = estimate(&request.items, request.contingency_percent)?;
    trace_skipped(&result);
    record_history(&state, "renovation.estimate", &request, &result);
    Ok(Json(ApiResponse::success(result)))
}

async fn renovation_catalog_estimate(
    State(state): State<AppState>,
    AppJson(request): AppJson<CatalogEstimateRequest>,
) -> Result<Json<ApiResponse<RenovationEstimate>>, AppError> {
    let result = catalog_estimate(&request.items, request.contingency_percent)?;
    trace_skipped(&result);
    record_history(&state, "renovation.catalog_estimate", &request, &result);
    Ok(Json(ApiResponse::success(result)))
}

/// Standard unit costs the catalog estimator prices with.
async fn renovation_catalog() -> Json<ApiResponse<&'static [CatalogEntry]>> {
    Json(ApiResponse::success(catalog()))
}

fn trace_skipped(estimate: &RenovationEstimate) {
    for item in &estimate.skipped {
        tracing::debug!(index = item.index, reason = %item.reason, "renovation line skipped");
    }
}
