//! HTTP surface for the investment calculators.
//!
//! One route module per calculator family. Calculation handlers all follow
//! the same shape: parse the body, run the pure formula, hand the result to
//! history without waiting on it, answer with the JSON envelope. The server
//! also runs without a database; only `/api/history` and `/api/properties`
//! need one, the calculators never do.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{FromRequest, Request, State};
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use calc_core::{CalcError, CalculationRecord, HistorySink};
use property_store::PropertyStore;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transfer_tax::TaxTable;

pub mod flip_routes;
pub mod history_routes;
pub mod mortgage_routes;
pub mod multi_routes;
pub mod property_routes;
pub mod renovation_routes;
mod request_id;
mod security_headers;
pub mod tax_routes;

pub const DEFAULT_PORT: u16 = 3000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// State shared by every route.
#[derive(Clone)]
pub struct AppState {
    /// History and property persistence. `None` when no database is
    /// configured; the calculators stay up regardless.
    pub store: Option<Arc<PropertyStore>>,
    /// Transfer tax table applied when a request names neither a table nor
    /// a municipality.
    pub default_tax_table: Arc<TaxTable>,
}

impl AppState {
    pub fn new(store: Option<PropertyStore>, default_tax_table: TaxTable) -> Self {
        Self {
            store: store.map(Arc::new),
            default_tax_table: Arc::new(default_tax_table),
        }
    }
}

/// Envelope every endpoint answers with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Route-level error: what went wrong plus the status it maps to.
///
/// Plain 500s render a generic message so internals never leak; every
/// other status passes its message through to the client. 5xx details go
/// to the log either way.
#[derive(Debug)]
pub struct AppError {
    pub(crate) status: StatusCode,
    pub(crate) source: anyhow::Error,
}

impl AppError {
    pub fn with_status(status: StatusCode, source: anyhow::Error) -> Self {
        Self { status, source }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, anyhow::anyhow!(message.into()))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(source: anyhow::Error) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, source)
    }
}

impl From<CalcError> for AppError {
    fn from(error: CalcError) -> Self {
        let status = match &error {
            CalcError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CalcError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::with_status(status, error.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = ?self.source, "request failed");
        }

        let message = if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.source.to_string()
        };

        (self.status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// `axum::Json` that rejects malformed bodies with the error envelope
/// instead of axum's plain-text response.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())),
        }
    }
}

/// Record one finished calculation without blocking the response.
///
/// History is best effort: when there is no store the call is a no-op, and
/// a failed insert only produces a warning.
pub(crate) fn record_history<I, O>(
    state: &AppState,
    calculator: &'static str,
    inputs: &I,
    outputs: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let store = match state.store.clone() {
        Some(store) => store,
        None => return,
    };

    let record = CalculationRecord::new(
        calculator,
        serde_json::to_value(inputs).unwrap_or_default(),
        serde_json::to_value(outputs).unwrap_or_default(),
    );

    tokio::spawn(async move {
        if let Err(e) = store.record(&record).await {
            tracing::warn!(calculator, error = %e, "could not record calculation history");
        }
    });
}

/// The store, or a 503 telling the caller persistence is off.
pub(crate) fn require_store(state: &AppState) -> Result<&PropertyStore, AppError> {
    match &state.store {
        Some(store) => Ok(store.as_ref()),
        None => Err(AppError::with_status(
            StatusCode::SERVICE_UNAVAILABLE,
            anyhow::anyhow!("no database configured; set DATABASE_URL to enable persistence"),
        )),
    }
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    history_enabled: bool,
}

async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        history_enabled: state.store.is_some(),
    }))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(format!("no route for {uri}"))),
    )
}

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(flip_routes::flip_routes())
        .merge(multi_routes::multi_routes())
        .merge(mortgage_routes::mortgage_routes())
        .merge(tax_routes::tax_routes())
        .merge(renovation_routes::renovation_routes())
        .merge(history_routes::history_routes())
        .merge(property_routes::property_routes())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(
                    |request: &axum::http::Request<axum::body::Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = tracing::field::Empty,
                        )
                    },
                ))
                .layer(axum::middleware::from_fn(request_id::request_id_middleware))
                .layer(axum::middleware::from_fn(
                    security_headers::security_headers_middleware,
                ))
                .layer(cors_layer())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}

/// Read configuration from the environment and serve until shutdown.
pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:immoiq.db".to_string());
    let store = match PropertyStore::new(&database_url).await {
        Ok(store) => {
            tracing::info!(url = %database_url, "history and property registry enabled");
            Some(store)
        }
        Err(e) => {
            tracing::warn!(
                url = %database_url,
                error = %e,
                "database unavailable; calculators stay up, history and properties are disabled"
            );
            None
        }
    };

    let default_tax_table = default_tax_table_from_env()?;
    tracing::info!(table = default_tax_table.name, "default transfer tax table");

    let app = router(AppState::new(store, default_tax_table));

    let host = std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = match std::env::var("API_PORT") {
        Ok(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("API_PORT must be a port number, got {value}"))?,
        Err(_) => DEFAULT_PORT,
    };

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("listening on {host}:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "api_server=info,tower_http=info".into());

    if json_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Permissive CORS unless `CORS_ORIGIN` pins a single origin.
fn cors_layer() -> CorsLayer {
    match std::env::var("CORS_ORIGIN") {
        Ok(origin) if origin != "*" => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                tracing::warn!(origin, "CORS_ORIGIN is not a valid origin; allowing any");
                CorsLayer::permissive()
            }
        },
        _ => CorsLayer::permissive(),
    }
}

fn default_tax_table_from_env() -> anyhow::Result<TaxTable> {
    match std::env::var("TRANSFER_TAX_TABLE") {
        Ok(name) => TaxTable::for_name(&name).ok_or_else(|| {
            let known: Vec<&str> = TaxTable::all().iter().map(|t| t.name).collect();
            anyhow::anyhow!(
                "TRANSFER_TAX_TABLE={name} is not a known table (known: {})",
                known.join(", ")
            )
        }),
        Err(_) => Ok(TaxTable::quebec_standard()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn success_envelope_carries_data_only() {
        let value = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"], json!(42));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn error_envelope_carries_message_only() {
        let value = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("boom"));
        assert!(value.get("data").is_none());
    }

    #[tokio::test]
    async fn invalid_input_maps_to_400_with_its_message() {
        let error: AppError = CalcError::invalid("unit_count must be at least 1").into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value = body_json(response).await;
        assert_eq!(value["success"], json!(false));
        assert!(value["error"].as_str().unwrap().contains("unit_count"));
    }

    #[tokio::test]
    async fn unexpected_failures_stay_generic() {
        let error = AppError::from(anyhow::anyhow!("connection pool exploded"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let value = body_json(response).await;
        assert_eq!(value["error"], json!("Internal server error"));
    }

    #[tokio::test]
    async fn missing_store_answers_503_with_the_reason() {
        let state = AppState::new(None, TaxTable::quebec_standard());
        let error = match require_store(&state) {
            Err(error) => error,
            Ok(_) => panic!("state has no store"),
        };

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let value = body_json(response).await;
        assert!(value["error"].as_str().unwrap().contains("DATABASE_URL"));
    }
}
