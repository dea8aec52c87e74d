use crate::config::Config;
use crate::errors::AppError;
use crate::models::{LookupForm, LookupPayload, LookupResult};
use crate::simulator::{LookupSimulator, SeededRandom};
use crate::validation::validate_lookup_form;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, map_response_body::MapResponseBodyLayer,
    trace::TraceLayer,
};

/// Maximum accepted request body; a lookup form is two short strings.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Shared application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Lookup simulator shared by all requests.
    pub simulator: LookupSimulator,
}

impl AppState {
    pub fn new(simulator: LookupSimulator) -> Self {
        Self { simulator }
    }

    /// Builds the state from configuration, seeding the RNG when requested.
    pub fn from_config(config: &Config) -> Self {
        let simulator = match config.rng_seed {
            Some(seed) => LookupSimulator::with_sources(
                config.simulator_config(),
                Arc::new(crate::simulator::SystemClock),
                Arc::new(SeededRandom::new(seed)),
            ),
            None => LookupSimulator::new(config.simulator_config()),
        };
        Self::new(simulator)
    }
}

/// Builds the HTTP router with all routes and middleware.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/lookup", post(lookup))
        .route("/api/v1/lookup/validate", post(validate))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "doc-lookup-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/lookup/validate
///
/// Validates a form submission without running a lookup.
pub async fn validate(
    form: Result<Json<LookupForm>, JsonRejection>,
) -> Result<Json<LookupPayload>, AppError> {
    let Json(form) = form?;
    let payload = validate_lookup_form(&form)?;
    Ok(Json(payload))
}

/// POST /api/v1/lookup
///
/// Validates the submission, then runs the simulated lookup.
///
/// A simulated failure is still a 200: the outcome lives in the result
/// record. Only unreadable bodies (400) and validation failures (422)
/// produce an error status.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `form` - JSON body with `documentType` and `documentNumber`.
///
/// # Returns
///
/// * `Result<Json<LookupResult>, AppError>` - The lookup result or a request error.
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    form: Result<Json<LookupForm>, JsonRejection>,
) -> Result<Json<LookupResult>, AppError> {
    let Json(form) = form?;
    tracing::info!("POST /lookup - type: {:?}", form.document_type);

    let payload = validate_lookup_form(&form)?;
    let result = state.simulator.lookup_detached(payload).await;

    tracing::info!(
        "Lookup finished: reference={}, success={}",
        result.reference,
        result.success
    );

    Ok(Json(result))
}
