//! Uniform response envelope.
//!
//! # Shapes
//! - success: `{"data": <payload>, "code": 200}`
//! - failure: `{"error": "<message>", "code": 400 | 500}`
//!
//! The HTTP status always equals `code`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::relay::{Payload, RelayError};

/// Body returned for every relay call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Success { data: Payload, code: u16 },
    Failure { error: String, code: u16 },
}

impl Envelope {
    pub fn success(data: Payload) -> Self {
        Envelope::Success {
            data,
            code: StatusCode::OK.as_u16(),
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Envelope::Failure {
            error: error.into(),
            code: StatusCode::BAD_REQUEST.as_u16(),
        }
    }

    pub fn internal_error(error: impl Into<String>) -> Self {
        Envelope::Failure {
            error: error.into(),
            code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }

    /// Map a relay failure: validation → 400, everything else → 500.
    pub fn from_error(err: &RelayError) -> Self {
        if err.is_validation() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal_error(format!("Internal server error: {err}"))
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Envelope::Success { code, .. } | Envelope::Failure { code, .. } => *code,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<Result<Payload, RelayError>> for Envelope {
    fn from(result: Result<Payload, RelayError>) -> Self {
        match result {
            Ok(data) => Envelope::success(data),
            Err(e) => Envelope::from_error(&e),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
