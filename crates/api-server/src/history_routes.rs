//! Calculation history endpoints.

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use property_store::HistoryEntry;
use serde::{Deserialize, Serialize};

use crate::{require_store, ApiResponse, AppError, AppState};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Restrict to one calculator, e.g. "flip.napkin".
    pub calculator: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub entries: Vec<HistoryEntry>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub pages: i64,
}

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/api/history", get(list_history))
}

async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryPage>>, AppError> {
    let store = require_store(&state)?;
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let calculator = query.calculator.as_deref();

    let entries = store.recent_calculations(calculator, page, limit).await?;
    let total = store.count_calculations(calculator).await?;

    Ok(Json(ApiResponse::success(HistoryPage {
        entries,
        total,
        page,
        limit,
        pages: page_count(total, limit),
    })))
}

/// Pages needed for `total` rows at `limit` rows per page.
fn page_count(total: i64, limit: u32) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit as i64 - 1) / limit as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(100, 20), 5);
    }
}
