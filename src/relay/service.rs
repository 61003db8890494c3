//! Forwarding service tying the relay pipeline together.

use crate::backend::{BackendBody, BackendClient, BackendResult};
use crate::relay::body::build_body;
use crate::relay::error::RelayResult;
use crate::relay::normalize::{normalize, Payload};
use crate::relay::request::RelayRequest;

/// Validate → build body → call backend → normalize.
#[derive(Debug, Clone)]
pub struct RelayService {
    client: BackendClient,
}

impl RelayService {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Forward `request` to the backend and return the normalized payload.
    ///
    /// Validation happens before anything touches the network.
    pub async fn forward(&self, request: &RelayRequest) -> RelayResult<Payload> {
        let path = request.validated_path()?;
        let body = build_body(request);

        tracing::info!(
            path = %path,
            url = %self.client.endpoint_url(path),
            fields = body.len(),
            "Forwarding request to backend"
        );

        let response = self.client.post(path, &body).await?;
        Ok(normalize(response))
    }

    /// Send a probe to `path` and return the raw backend JSON, shape preserved.
    pub async fn probe(&self, path: &str, body: &BackendBody) -> BackendResult<serde_json::Value> {
        self.client.post(path, body).await.map(|r| r.into_value())
    }
}
