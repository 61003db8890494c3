//! Relay error taxonomy.

use thiserror::Error;

use crate::backend::BackendError;

/// Message returned when the request carries no usable path.
pub const MISSING_PATH_MESSAGE: &str = "path parameter is required";

/// Errors surfaced by a relay call.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing, null or blank `path`; no backend call was made.
    #[error("{}", MISSING_PATH_MESSAGE)]
    MissingPath,

    /// Any failure talking to the backend or decoding its reply.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl RelayError {
    /// True for errors caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, RelayError::MissingPath)
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
