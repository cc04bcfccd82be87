//! Transfer tax ("welcome tax") endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use transfer_tax::{compute_tax, TaxTable, TransferTaxResult};

use crate::{record_history, ApiResponse, AppError, AppJson, AppState};

/// Municipalities with a schedule of their own. Everything else uses the
/// configured default.
const KNOWN_MUNICIPALITIES: &[&str] = &["Montréal", "Laval", "Québec"];

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferTaxRequest {
    pub property_value: f64,
    /// Bracket table to use, by name. Takes precedence over
    /// `municipality`; unknown names are rejected.
    #[serde(default)]
    pub table: Option<String>,
    /// Municipality whose schedule applies. Unknown names fall back to the
    /// standard schedule; the response says which table was used.
    #[serde(default)]
    pub municipality: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransferTaxResponse {
    #[serde(flatten)]
    pub result: TransferTaxResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MunicipalityProfile {
    pub municipality: &'static str,
    pub table: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TaxTablesResponse {
    pub default_table: &'static str,
    pub tables: Vec<TaxTable>,
    pub municipalities: Vec<MunicipalityProfile>,
}

pub fn tax_routes() -> Router<AppState> {
    Router::new()
        .route("/api/calculators/transfer-tax", post(transfer_tax))
        .route("/api/calculators/transfer-tax/tables", get(tax_tables))
}

async fn transfer_tax(
    State(state): State<AppState>,
    AppJson(request): AppJson<TransferTaxRequest>,
) -> Result<Json<ApiResponse<TransferTaxResponse>>, AppError> {
    let table = resolve_table(&state, &request)?;
    let result = compute_tax(request.property_value, &table)?;
    let response = TransferTaxResponse {
        result,
        municipality: request.municipality.clone(),
    };
    record_history(&state, "tax.transfer", &request, &response);
    Ok(Json(ApiResponse::success(response)))
}

async fn tax_tables(State(state): State<AppState>) -> Json<ApiResponse<TaxTablesResponse>> {
    let municipalities = KNOWN_MUNICIPALITIES
        .iter()
        .map(|municipality| MunicipalityProfile {
            municipality,
            table: TaxTable::for_municipality(municipality).name,
        })
        .collect();

    Json(ApiResponse::success(TaxTablesResponse {
        default_table: state.default_tax_table.name,
        tables: TaxTable::all(),
        municipalities,
    }))
}

/// Table resolution order: explicit table name, then municipality, then
/// the service default.
fn resolve_table(state: &AppState, request: &TransferTaxRequest) -> Result<TaxTable, AppError> {
    if let Some(name) = request.table.as_deref() {
        return TaxTable::for_name(name).ok_or_else(|| {
            let known: Vec<&str> = TaxTable::all().iter().map(|t| t.name).collect();
            AppError::bad_request(format!(
                "unknown tax table '{name}'; known tables: {}",
                known.join(", ")
            ))
        });
    }

    if let Some(municipality) = request.municipality.as_deref() {
        return Ok(TaxTable::for_municipality(municipality));
    }

    Ok(state.default_tax_table.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn state() -> AppState {
        AppState::new(None, TaxTable::quebec_indexed_2024())
    }

    fn request(table: Option<&str>, municipality: Option<&str>) -> TransferTaxRequest {
        TransferTaxRequest {
            property_value: 300_000.0,
            table: table.map(String::from),
            municipality: municipality.map(String::from),
        }
    }

    #[test]
    fn explicit_table_beats_municipality() {
        let table =
            resolve_table(&state(), &request(Some("quebec-city"), Some("Montréal"))).unwrap();
        assert_eq!(table.name, "quebec-city");
    }

    #[test]
    fn unknown_table_is_rejected_listing_the_known_ones() {
        let error = resolve_table(&state(), &request(Some("ontario"), None)).unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        let message = error.source.to_string();
        assert!(message.contains("ontario"));
        assert!(message.contains("quebec-standard"));
    }

    #[test]
    fn unknown_municipality_gets_the_standard_schedule() {
        let table = resolve_table(&state(), &request(None, Some("Trois-Rivières"))).unwrap();
        assert_eq!(table.name, "quebec-standard");
    }

    #[test]
    fn quebec_city_gets_its_own_schedule() {
        let table = resolve_table(&state(), &request(None, Some("Québec"))).unwrap();
        assert_eq!(table.name, "quebec-city");
    }

    #[test]
    fn nothing_named_uses_the_configured_default() {
        let table = resolve_table(&state(), &request(None, None)).unwrap();
        assert_eq!(table.name, "quebec-indexed-2024");
    }
}
