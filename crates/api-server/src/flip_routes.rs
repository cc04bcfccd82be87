//! Flip calculator endpoints.
//!
//! Napkin profit and offer run the FIP10 shortcut; detailed runs the full
//! pro-forma with itemized or estimated cost blocks.

use axum::{extract::State, routing::post, Json, Router};
use flip_analysis::{
    detailed_flip, napkin_offer, napkin_profit, DetailedFlipInput, DetailedFlipResult,
    NapkinFlipResult, NapkinOfferResult,
};
use serde::{Deserialize, Serialize};

use crate::{record_history, ApiResponse, AppError, AppJson, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct NapkinFlipRequest {
    pub final_price: f64,
    pub initial_price: f64,
    #[serde(default)]
    pub renovation_cost: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NapkinOfferRequest {
    pub final_price: f64,
    #[serde(default)]
    pub renovation_cost: f64,
    /// Profit the offer must leave on the table. Default $25,000.
    #[serde(default)]
    pub desired_profit: Option<f64>,
}

pub fn flip_routes() -> Router<AppState> {
    Router::new()
        .route("/api/calculators/flip/napkin", post(flip_napkin))
        .route("/api/calculators/flip/offer", post(flip_offer))
        .route("/api/calculators/flip/detailed", post(flip_detailed))
}

async fn flip_napkin(
    State(state): State<AppState>,
    AppJson(request): AppJson<NapkinFlipRequest>,
) -> Result<Json<ApiResponse<NapkinFlipResult>>, AppError> {
    let result = napkin_profit(
        request.final_price,
        request.initial_price,
        request.renovation_cost,
    )?;
    record_history(&state, "flip.napkin", &request, &result);
    Ok(Json(ApiResponse::success(result)))
}

async fn flip_offer(
    State(state): State<AppState>,
    AppJson(request): AppJson<NapkinOfferRequest>,
) -> Result<Json<ApiResponse<NapkinOfferResult>>, AppError> {
    let result = napkin_offer(
        request.final_price,
        request.renovation_cost,
        request.desired_profit,
    )?;
    record_history(&state, "flip.offer", &request, &result);
    Ok(Json(ApiResponse::success(result)))
}

async fn flip_detailed(
    State(state): State<AppState>,
    AppJson(input): AppJson<DetailedFlipInput>,
) -> Result<Json<ApiResponse<DetailedFlipResult>>, AppError> {
    let result = detailed_flip(&input, &state.default_tax_table)?;
    record_history(&state, "flip.detailed", &input, &result);
    Ok(Json(ApiResponse::success(result)))
}
