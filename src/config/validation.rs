//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the backend URL and header names before the client is built
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid backend.base_url '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("backend.api_prefix must start with '/', got '{0}'")]
    InvalidApiPrefix(String),

    #[error("invalid {field}: '{value}' is not a valid header name")]
    InvalidHeaderName { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("timeouts.backend_secs ({backend}) must be below timeouts.request_secs ({request})")]
    BackendTimeoutTooLong { backend: u64, request: u64 },

    #[error("listener.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let backend = &config.backend;
    match Url::parse(&backend.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::InvalidBaseUrl {
            value: backend.base_url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidBaseUrl {
            value: backend.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if !backend.api_prefix.starts_with('/') {
        errors.push(ValidationError::InvalidApiPrefix(backend.api_prefix.clone()));
    }

    check_header(&mut errors, "backend.api_key_header", &backend.api_key_header);
    check_header(&mut errors, "backend.correlation_header", &backend.correlation_header);

    let timeouts = &config.timeouts;
    for (field, value) in [
        ("timeouts.connect_secs", timeouts.connect_secs),
        ("timeouts.backend_secs", timeouts.backend_secs),
        ("timeouts.request_secs", timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout { field });
        }
    }
    if timeouts.backend_secs >= timeouts.request_secs {
        errors.push(ValidationError::BackendTimeoutTooLong {
            backend: timeouts.backend_secs,
            request: timeouts.request_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_header(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if HeaderName::from_bytes(value.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName {
            field,
            value: value.to_string(),
        });
    }
}
