//! Backend transport subsystem.
//!
//! # Data Flow
//! ```text
//! relative path + BackendBody
//!     → client.rs (URL normalization, headers, one POST)
//!     → types.rs (classify body: Array | Object, or BackendError)
//! ```
//!
//! # Design Decisions
//! - Exactly one backend, configured at startup
//! - One attempt per call; every failure is surfaced, never retried
//! - Connect and total timeouts are always set on the client

pub mod client;
pub mod types;

pub use client::{normalize_path, BackendClient};
pub use types::{BackendBody, BackendError, BackendResponse, BackendResult};
