//! Relay core.
//!
//! # Data Flow
//! ```text
//! RelayRequest (request.rs)
//!     → validated_path (missing/blank path rejected, no network)
//!     → build_body (body.rs, present non-blank fields only)
//!     → BackendClient::post (backend/)
//!     → normalize (normalize.rs, array / data / whole-object)
//!     → Payload, wrapped into an Envelope by the HTTP layer
//! ```

pub mod body;
pub mod error;
pub mod normalize;
pub mod request;
pub mod service;

pub use body::build_body;
pub use error::{RelayError, RelayResult, MISSING_PATH_MESSAGE};
pub use normalize::{normalize, Payload};
pub use request::RelayRequest;
pub use service::RelayService;
