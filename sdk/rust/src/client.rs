use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/proxy`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biz_seq: Option<String>,
}

impl ProxyRequest {
    pub fn new(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            ..Self::default()
        }
    }
}

/// The relay's `{data|error, code}` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayEnvelope {
    /// HTTP status the envelope arrived with.
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    pub code: u16,
}

impl RelayEnvelope {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.code == 200
    }
}

pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::builder().no_proxy().build().unwrap_or_default(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
        }
    }

    /// Forward a request through the relay.
    ///
    /// Error envelopes (400/500) are returned as `Ok`; only transport or
    /// decoding failures are `Err`.
    pub async fn proxy(&self, req: &ProxyRequest) -> Result<RelayEnvelope, Box<dyn std::error::Error>> {
        let resp = self.client
            .post(format!("{}/api/proxy", self.relay_url))
            .json(req)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let text = resp.text().await?;

        let mut envelope: RelayEnvelope = serde_json::from_str(&text)
            .map_err(|e| format!("Relay returned a non-envelope body (status {}): {}: {}", status, e, text))?;
        envelope.status = status;
        Ok(envelope)
    }

    /// Fetch the relay's health payload.
    pub async fn health(&self) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let resp = self.client
            .get(format!("{}/api/health", self.relay_url))
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    /// Ask the relay to probe its backend.
    pub async fn test_backend(&self) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let resp = self.client
            .post(format!("{}/api/test-backend", self.relay_url))
            .send()
            .await?;
        Ok(resp.json().await?)
    }
}
