//! Route handlers.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    BoxError, Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::request::request_id;
use crate::http::response::Envelope;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::RelayRequest;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

/// Outcome of `POST /api/test-backend`.
#[derive(Debug, Serialize)]
pub struct ProbeResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `POST /api/proxy`: forward one call and wrap the result.
pub async fn proxy(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Envelope {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let envelope = match payload {
        Ok(Json(request)) => {
            let result = state.relay.forward(&request).await;
            match &result {
                Err(e) if e.is_validation() => {
                    tracing::warn!(request_id = %request_id, error = %e, "Rejected relay request")
                }
                Err(e) => tracing::error!(request_id = %request_id, error = %e, "Relay request failed"),
                Ok(_) => {}
            }
            Envelope::from(result)
        }
        Err(rejection) => {
            tracing::warn!(request_id = %request_id, error = %rejection, "Unreadable relay request body");
            Envelope::bad_request(format!("invalid request body: {}", rejection.body_text()))
        }
    };

    metrics::record_request(envelope.code(), start);
    tracing::debug!(
        request_id = %request_id,
        code = envelope.code(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Relay request completed"
    );
    envelope
}

/// `GET /api/health`: static liveness payload.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        message: "api relay middle tier",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /api/test-backend`: probe the backend with the configured sample call.
///
/// Always answers 200; the outcome is in `success`.
pub async fn test_backend(State(state): State<AppState>) -> Json<ProbeResult> {
    let result = state.relay.probe(&state.probe_path, &state.probe_body).await;

    Json(match result {
        Ok(response) => ProbeResult {
            success: true,
            response: Some(response),
            error: None,
        },
        Err(e) => {
            tracing::warn!(path = %state.probe_path, error = %e, "Backend probe failed");
            ProbeResult {
                success: false,
                response: None,
                error: Some(e.to_string()),
            }
        }
    })
}

/// Turn a middleware failure (the inbound deadline, mostly) into a 500 envelope.
pub async fn handle_middleware_error(err: BoxError) -> Envelope {
    let message = if err.is::<tower::timeout::error::Elapsed>() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    tracing::error!(error = %message, "Request aborted by middleware");
    metrics::record_aborted();
    Envelope::internal_error(format!("Internal server error: {message}"))
}
