//! Mortgage calculator endpoints.

use axum::{extract::State, routing::post, Json, Router};
use mortgage_engine::{
    amortization_schedule, payment_quote, LoanTerms, PaymentQuote, ScheduleQuote,
};
use serde::{Deserialize, Serialize};

use crate::{record_history, ApiResponse, AppError, AppJson, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct AmortizationRequest {
    #[serde(flatten)]
    pub terms: LoanTerms,
    /// Contract term to tabulate, capped at the full amortization.
    /// Default 5 years.
    #[serde(default)]
    pub term_years: Option<u32>,
}

pub fn mortgage_routes() -> Router<AppState> {
    Router::new()
        .route("/api/calculators/mortgage/payment", post(mortgage_payment))
        .route(
            "/api/calculators/mortgage/amortization",
            post(mortgage_amortization),
        )
}

async fn mortgage_payment(
    State(state): State<AppState>,
    AppJson(terms): AppJson<LoanTerms>,
) -> Result<Json<ApiResponse<PaymentQuote>>, AppError> {
    let quote = payment_quote(&terms)?;
    record_history(&state, "mortgage.payment", &terms, &quote);
    Ok(Json(ApiResponse::success(quote)))
}

async fn mortgage_amortization(
    State(state): State<AppState>,
    AppJson(request): AppJson<AmortizationRequest>,
) -> Result<Json<ApiResponse<ScheduleQuote>>, AppError> {
    let schedule = amortization_schedule(&request.terms, request.term_years)?;
    record_history(&state, "mortgage.amortization", &request, &schedule);
    Ok(Json(ApiResponse::success(schedule)))
}
