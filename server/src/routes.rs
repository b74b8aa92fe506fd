/// HTTP route handlers and wire shapes for the Scout service.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

use scout_shared::errors::{ErrorClass, ScoutError};
use scout_shared::models::FetchReport;

use crate::accounting;
use crate::runner::FetchJobRunner;
use crate::AppState;

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/fetch", post(run_fetch))
        .route("/api/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// POST /api/fetch - run one bounded fetch invocation.
///
/// The request body is opaque trigger payload; no fields are read from
/// it. Every outcome is a well-formed JSON body.
pub async fn run_fetch(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let invocation_id = Uuid::new_v4().to_string();
    let request = state.config.request_for(&invocation_id);
    info!("Invocation {} started", invocation_id);

    let job = FetchJobRunner::new(state.fetcher.clone());
    match job.run(&request).await {
        Ok(report) => (StatusCode::OK, Json(success_body(&report))),
        Err(e) => {
            warn!("Invocation {} failed: {}", invocation_id, e);
            (error_status(&e), Json(error_body(&e)))
        }
    }
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Success wire shape.
pub fn success_body(report: &FetchReport) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "total_videos_on_channel": report.total_discovered,
        "downloaded_count": report.downloaded_count,
        "total_size_mb": accounting::to_mb_rounded(report.total_size_bytes),
        "files": report.files,
        "timestamp": report.completed_at.to_rfc3339(),
    })
}

/// Failure wire shape.
pub fn error_body(err: &ScoutError) -> serde_json::Value {
    serde_json::json!({
        "error": err.to_string(),
        "timestamp": Utc::now().to_rfc3339(),
    })
}

/// Status mapping: client-class failures are the caller's input; a
/// capability failure is an upstream problem.
pub fn error_status(err: &ScoutError) -> StatusCode {
    match err.class() {
        ErrorClass::Client => StatusCode::BAD_REQUEST,
        ErrorClass::Server => match err {
            ScoutError::Transfer(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}
