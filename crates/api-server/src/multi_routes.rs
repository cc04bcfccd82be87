//! Multi-unit rental calculator endpoints.
//!
//! Napkin cashflow and max price run the PAR method with the HIGH-5 debt
//! shortcut; detailed runs the pro-forma with a real mortgage payment.

use axum::{extract::State, routing::post, Json, Router};
use multi_analysis::{
    detailed_multi, max_purchase_price, napkin_cashflow, DetailedMultiInput, DetailedMultiResult,
    MaxPurchaseResult, NapkinMultiResult,
};
use serde::{Deserialize, Serialize};

use crate::{record_history, ApiResponse, AppError, AppJson, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct NapkinMultiRequest {
    pub purchase_price: f64,
    pub unit_count: u32,
    pub gross_annual_revenue: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MaxPriceRequest {
    pub unit_count: u32,
    pub gross_annual_revenue: f64,
    /// Monthly cashflow each unit must clear. Default $75.
    #[serde(default)]
    pub target_cashflow_per_unit: Option<f64>,
}

pub fn multi_routes() -> Router<AppState> {
    Router::new()
        .route("/api/calculators/multi/napkin", post(multi_napkin))
        .route("/api/calculators/multi/max-price", post(multi_max_price))
        .route("/api/calculators/multi/detailed", post(multi_detailed))
}

async fn multi_napkin(
    State(state): State<AppState>,
    AppJson(request): AppJson<NapkinMultiRequest>,
) -> Result<Json<ApiResponse<NapkinMultiResult>>, AppError> {
    let result = napkin_cashflow(
        request.purchase_price,
        request.unit_count,
        request.gross_annual_revenue,
    )?;
    record_history(&state, "multi.napkin", &request, &result);
    Ok(Json(ApiResponse::success(result)))
}

async fn multi_max_price(
    State(state): State<AppState>,
    AppJson(request): AppJson<MaxPriceRequest>,
) -> Result<Json<ApiResponse<MaxPurchaseResult>>, AppError> {
    let result = max_purchase_price(
        request.unit_count,
        request.gross_annual_revenue,
        request.target_cashflow_per_unit,
    )?;
    record_history(&state, "multi.max_price", &request, &result);
    Ok(Json(ApiResponse::success(result)))
}

async fn multi_detailed(
    State(state): State<AppState>,
    AppJson(input): AppJson<DetailedMultiInput>,
) -> Result<Json<ApiResponse<DetailedMultiResult>>, AppError> {
    let result = detailed_multi(&input)?;
    record_history(&state, "multi.detailed", &input, &result);
    Ok(Json(ApiResponse::success(result)))
}
