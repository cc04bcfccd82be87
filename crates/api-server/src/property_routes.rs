//! Property registry and project endpoints.
//!
//! A light CRUD layer so deals being analyzed can be kept alongside their
//! calculations. None of the calculators depend on any of this.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use property_store::{
    Project, ProjectInput, Property, PropertyInput, PROJECT_STATUSES, PROJECT_STRATEGIES,
    PROPERTY_TYPES,
};
use serde::Serialize;

use crate::{require_store, ApiResponse, AppError, AppJson, AppState};

/// Echo of a completed delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}

pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/api/properties", get(list_properties))
        .route("/api/properties", post(create_property))
        .route("/api/properties/:id", get(get_property))
        .route("/api/properties/:id", put(update_property))
        .route("/api/properties/:id", delete(delete_property))
        .route("/api/properties/:id/projects", get(list_projects))
        .route("/api/properties/:id/projects", post(create_project))
        .route("/api/projects/:id", get(get_project))
        .route("/api/projects/:id", put(update_project))
        .route("/api/projects/:id", delete(delete_project))
}

async fn list_properties(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Property>>>, AppError> {
    let store = require_store(&state)?;
    Ok(Json(ApiResponse::success(store.list_properties().await?)))
}

async fn create_property(
    State(state): State<AppState>,
    AppJson(input): AppJson<PropertyInput>,
) -> Result<Json<ApiResponse<Property>>, AppError> {
    let store = require_store(&state)?;
    validate_property_input(&input)?;
    Ok(Json(ApiResponse::success(
        store.insert_property(&input).await?,
    )))
}

async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Property>>, AppError> {
    let store = require_store(&state)?;
    let property = store
        .get_property(&id)
        .await?
        .ok_or_else(|| not_found("property", &id))?;
    Ok(Json(ApiResponse::success(property)))
}

async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<PropertyInput>,
) -> Result<Json<ApiResponse<Property>>, AppError> {
    let store = require_store(&state)?;
    validate_property_input(&input)?;
    let property = store
        .update_property(&id, &input)
        .await?
        .ok_or_else(|| not_found("property", &id))?;
    Ok(Json(ApiResponse::success(property)))
}

async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Deleted>>, AppError> {
    let store = require_store(&state)?;
    if !store.delete_property(&id).await? {
        return Err(not_found("property", &id));
    }
    Ok(Json(ApiResponse::success(Deleted { id })))
}

async fn list_projects(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Project>>>, AppError> {
    let store = require_store(&state)?;
    // A missing property is a 404, not an empty list.
    if store.get_property(&id).await?.is_none() {
        return Err(not_found("property", &id));
    }
    Ok(Json(ApiResponse::success(store.list_projects(&id).await?)))
}

async fn create_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<ProjectInput>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let store = require_store(&state)?;
    validate_project_input(&input)?;
    let project = store
        .insert_project(&id, &input)
        .await?
        .ok_or_else(|| not_found("property", &id))?;
    Ok(Json(ApiResponse::success(project)))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let store = require_store(&state)?;
    let project = store
        .get_project(&id)
        .await?
        .ok_or_else(|| not_found("project", &id))?;
    Ok(Json(ApiResponse::success(project)))
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<ProjectInput>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let store = require_store(&state)?;
    validate_project_input(&input)?;
    let project = store
        .update_project(&id, &input)
        .await?
        .ok_or_else(|| not_found("project", &id))?;
    Ok(Json(ApiResponse::success(project)))
}

async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Deleted>>, AppError> {
    let store = require_store(&state)?;
    if !store.delete_project(&id).await? {
        return Err(not_found("project", &id));
    }
    Ok(Json(ApiResponse::success(Deleted { id })))
}

fn not_found(kind: &str, id: &str) -> AppError {
    AppError::with_status(
        StatusCode::NOT_FOUND,
        anyhow::anyhow!("no {kind} with id {id}"),
    )
}

fn validate_property_input(input: &PropertyInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    if !PROPERTY_TYPES.contains(&input.property_type.as_str()) {
        return Err(AppError::bad_request(format!(
            "property_type must be one of: {}",
            PROPERTY_TYPES.join(", ")
        )));
    }
    if let Some(count) = input.unit_count {
        if count < 1 {
            return Err(AppError::bad_request("unit_count must be at least 1"));
        }
    }
    if let Some(price) = input.asking_price {
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::bad_request("asking_price must be zero or more"));
        }
    }
    Ok(())
}

fn validate_project_input(input: &ProjectInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    if !PROJECT_STRATEGIES.contains(&input.strategy.as_str()) {
        return Err(AppError::bad_request(format!(
            "strategy must be one of: {}",
            PROJECT_STRATEGIES.join(", ")
        )));
    }
    if let Some(status) = input.status.as_deref() {
        if !PROJECT_STATUSES.contains(&status) {
            return Err(AppError::bad_request(format!(
                "status must be one of: {}",
                PROJECT_STATUSES.join(", ")
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(property_type: &str) -> PropertyInput {
        PropertyInput {
            name: "Limoilou triplex".into(),
            address: None,
            city: Some("Québec".into()),
            property_type: property_type.into(),
            unit_count: Some(3),
            asking_price: Some(600_000.0),
            notes: None,
        }
    }

    fn project(strategy: &str, status: Option<&str>) -> ProjectInput {
        ProjectInput {
            name: "Buy and hold".into(),
            strategy: strategy.into(),
            status: status.map(String::from),
            notes: None,
        }
    }

    #[test]
    fn property_type_must_be_known() {
        assert!(validate_property_input(&property("MULTI")).is_ok());
        assert!(validate_property_input(&property("CASTLE")).is_err());
    }

    #[test]
    fn property_name_and_numbers_are_checked() {
        let mut input = property("FLIP");
        input.name = "  ".into();
        assert!(validate_property_input(&input).is_err());

        let mut input = property("FLIP");
        input.unit_count = Some(0);
        assert!(validate_property_input(&input).is_err());

        let mut input = property("FLIP");
        input.asking_price = Some(-1.0);
        assert!(validate_property_input(&input).is_err());
    }

    #[test]
    fn project_strategy_and_status_must_be_known() {
        assert!(validate_project_input(&project("MULTI", None)).is_ok());
        assert!(validate_project_input(&project("MULTI", Some("RENOVATION"))).is_ok());
        assert!(validate_project_input(&project("CRYPTO", None)).is_err());
        assert!(validate_project_input(&project("FLIP", Some("DREAMING"))).is_err());
    }
}
