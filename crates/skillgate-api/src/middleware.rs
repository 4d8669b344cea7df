//! Verification middleware: every protected request clears four gates
//! before its handler runs, or is answered with an empty 400.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::error;
use skillgate_verify::error::VerifyError;
use skillgate_verify::{CHAIN_URL_HEADER, SIGNATURE_HEADER};

use crate::router::GateState;

/// Authenticate a request, then hand the untouched body to the next
/// handler.
///
/// The body is buffered once; the signature covers its exact bytes, so the
/// request is reassembled from the same buffer after verification. Failures
/// are logged with full detail server-side while the caller only ever sees
/// an empty 400, regardless of which gate rejected.
pub async fn verify_request(
    State(state): State<GateState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    // Absent headers degrade to empty values and fail closed downstream.
    let chain_url = header_value(&parts.headers, CHAIN_URL_HEADER);
    let signature = header_value(&parts.headers, SIGNATURE_HEADER);

    let bytes = match to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("{}", VerifyError::BodyReadFailed(e.to_string()));
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    if let Err(e) = state.verifier.verify(&chain_url, &signature, &bytes).await {
        error!("request rejected: {e}");
        return StatusCode::BAD_REQUEST.into_response();
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    next.run(request).await
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}
