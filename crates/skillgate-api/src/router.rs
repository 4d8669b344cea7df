//! Axum router construction.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use log::error;
use serde::Serialize;
use skillgate_core::envelope::{RequestEnvelope, RequestKind};
use skillgate_core::response::ResponseEnvelope;
use skillgate_verify::verifier::RequestVerifier;

use crate::middleware::verify_request;

/// Shared application state handed to the verification middleware.
#[derive(Clone)]
pub struct GateState {
    /// The verifier every protected request passes through.
    pub verifier: Arc<RequestVerifier>,
    /// Upper bound on buffered request body size, in bytes.
    pub max_body_bytes: usize,
}

/// Response body for the health endpoint.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Build the application router.
///
/// The skill endpoint sits behind [`verify_request`]; `/healthz` does not.
pub fn build_router(state: GateState) -> Router {
    Router::new()
        .route("/", post(skill_handler))
        .layer(middleware::from_fn_with_state(state, verify_request))
        .route("/healthz", get(health_handler))
}

/// The protected endpoint: by the time this runs, the request has cleared
/// every verification gate and the body is readable from the start.
async fn skill_handler(body: Bytes) -> Result<Json<ResponseEnvelope>, StatusCode> {
    let envelope = RequestEnvelope::from_slice(&body).map_err(|e| {
        error!("envelope decode: {e}");
        StatusCode::BAD_REQUEST
    })?;

    let reply = match envelope.request.kind {
        RequestKind::LaunchRequest => ResponseEnvelope::new().ask("What would you like to do?"),
        RequestKind::SessionEndedRequest => ResponseEnvelope::new(),
        _ => ResponseEnvelope::new().tell("Done."),
    };
    Ok(Json(reply))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
