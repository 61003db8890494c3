//! Async client for the api-relay HTTP interface.

pub mod client;

pub use client::{ProxyRequest, RelayClient, RelayEnvelope};
