//! Single-endpoint HTTP relay library.
//!
//! Accepts a normalized `POST /api/proxy` request, forwards it to one fixed
//! backend and wraps the backend's JSON reply in a uniform envelope.

pub mod backend;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
