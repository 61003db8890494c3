//! Backend reply normalization.
//!
//! # Rules (first match wins)
//! 1. Bare array: every element converted, sequence returned as is.
//!    The `data` convention never applies to arrays.
//! 2. Object with a `data` key: that value converted and returned, every
//!    other key dropped.
//! 3. Any other object: converted whole into a mapping.
//!
//! Conversion is a single visit-and-rebuild over the JSON variants, so it is
//! total over arbitrary nesting and idempotent.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::backend::BackendResponse;

/// Key holding the payload in enveloped backend replies.
pub const DATA_FIELD: &str = "data";

/// Caller-facing value produced from a backend reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Payload>),
    /// Key order is not meaningful.
    Mapping(HashMap<String, Payload>),
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Null,
            Value::Bool(b) => Payload::Bool(b),
            Value::Number(n) => Payload::Number(n),
            Value::String(s) => Payload::String(s),
            Value::Array(items) => Payload::Sequence(items.into_iter().map(Payload::from).collect()),
            Value::Object(map) => Payload::from(map),
        }
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Mapping(map.into_iter().map(|(k, v)| (k, Payload::from(v))).collect())
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Null => Value::Null,
            Payload::Bool(b) => Value::Bool(b),
            Payload::Number(n) => Value::Number(n),
            Payload::String(s) => Value::String(s),
            Payload::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Payload::Mapping(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Apply the normalization rules to a classified backend reply.
pub fn normalize(response: BackendResponse) -> Payload {
    match response {
        BackendResponse::Array(items) => {
            tracing::debug!(len = items.len(), "Array response, returned without unwrapping");
            Payload::from(Value::Array(items))
        }
        BackendResponse::Object(mut map) => match map.remove(DATA_FIELD) {
            Some(data) => {
                tracing::debug!(dropped_keys = map.len(), "Extracting data field from backend response");
                Payload::from(data)
            }
            None => {
                tracing::debug!("No data field found, returning entire response");
                Payload::from(map)
            }
        },
    }
}
