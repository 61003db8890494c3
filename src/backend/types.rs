//! Backend wire types and error definitions.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Body posted to the backend: field name to value, present fields only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BackendBody(BTreeMap<&'static str, String>);

impl BackendBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

/// A successfully decoded backend reply, classified by its top-level shape.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendResponse {
    /// The body was a bare JSON array.
    Array(Vec<Value>),
    /// The body was a JSON object.
    Object(Map<String, Value>),
}

impl BackendResponse {
    /// Classify and decode a 2xx response body.
    ///
    /// A trimmed body starting with `[` must decode as an array; anything else
    /// must decode as an object. A blank body is an error of its own.
    pub fn from_body(body: &str) -> BackendResult<Self> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)
                .map(BackendResponse::Array)
                .map_err(BackendError::MalformedJson)
        } else {
            serde_json::from_str(trimmed)
                .map(BackendResponse::Object)
                .map_err(BackendError::MalformedJson)
        }
    }

    /// The response as a plain JSON value, shape preserved.
    pub fn into_value(self) -> Value {
        match self {
            BackendResponse::Array(items) => Value::Array(items),
            BackendResponse::Object(map) => Value::Object(map),
        }
    }
}

/// Errors that can occur while calling the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection, timeout or body read failure.
    #[error("backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("backend request failed with status {status}: {body}")]
    NonSuccess { status: u16, body: String },

    /// Backend answered 2xx with nothing in the body.
    #[error("backend returned null response")]
    EmptyResponse,

    /// Body present but not an array or object per the dispatch rule.
    #[error("malformed backend JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("failed to build backend client: {0}")]
    Client(String),
}

pub type BackendResult<T> = Result<T, BackendError>;
