//! HTTP client for the backend service.
//!
//! # Responsibilities
//! - Compute the absolute backend URL from a relative path
//! - Attach the static credential headers and a fresh correlation id
//! - Perform one POST per call, bounded by explicit timeouts
//! - Classify the outcome into a `BackendResponse` or a `BackendError`

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use uuid::Uuid;

use crate::backend::types::{BackendBody, BackendError, BackendResponse, BackendResult};
use crate::config::{BackendConfig, TimeoutConfig};
use crate::observability::metrics;

/// Client bound to the single configured backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    api_prefix: String,
    correlation_header: HeaderName,
    /// Content type and credentials, identical on every call.
    static_headers: HeaderMap,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// Fails when a configured header name or credential is not a legal
    /// header, or when the underlying HTTP client cannot be built.
    pub fn new(config: &BackendConfig, timeouts: &TimeoutConfig) -> BackendResult<Self> {
        let mut static_headers = HeaderMap::new();
        static_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if config.api_key.is_empty() {
            tracing::warn!(header = %config.api_key_header, "No backend API key configured, header will be omitted");
        } else {
            let name = header_name(&config.api_key_header)?;
            static_headers.insert(name, header_value(&config.api_key, "backend.api_key")?);
        }

        if config.bearer_token.is_empty() {
            tracing::warn!("No backend bearer token configured, Authorization header will be omitted");
        } else {
            let bearer = format!("Bearer {}", config.bearer_token);
            static_headers.insert(AUTHORIZATION, header_value(&bearer, "backend.bearer_token")?);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.backend_secs))
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        tracing::info!(
            base_url = %config.base_url,
            api_prefix = %config.api_prefix,
            connect_timeout_secs = timeouts.connect_secs,
            backend_timeout_secs = timeouts.backend_secs,
            "Backend client initialized"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_prefix: config.api_prefix.clone(),
            correlation_header: header_name(&config.correlation_header)?,
            static_headers,
        })
    }

    /// Absolute URL a relative `path` is forwarded to.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, normalize_path(path, &self.api_prefix))
    }

    /// POST `body` to `path` and classify the reply.
    pub async fn post(&self, path: &str, body: &BackendBody) -> BackendResult<BackendResponse> {
        let url = self.endpoint_url(path);
        let correlation_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        tracing::debug!(
            url = %url,
            correlation_id = %correlation_id,
            fields = ?body.fields().collect::<Vec<_>>(),
            "Calling backend"
        );

        let result = self.send(&url, &correlation_id, body).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_backend_call(outcome, start);

        match &result {
            Ok(_) => tracing::debug!(
                url = %url,
                correlation_id = %correlation_id,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Backend call completed"
            ),
            Err(e) => tracing::error!(
                url = %url,
                correlation_id = %correlation_id,
                error = %e,
                "Backend call failed"
            ),
        }

        result
    }

    async fn send(
        &self,
        url: &str,
        correlation_id: &str,
        body: &BackendBody,
    ) -> BackendResult<BackendResponse> {
        let response = self
            .client
            .post(url)
            .headers(self.static_headers.clone())
            .header(self.correlation_header.clone(), correlation_id)
            .json(body)
            .send()
            .await
            .map_err(BackendError::Unreachable)?;

        let status = response.status();
        let text = response.text().await.map_err(BackendError::Unreachable)?;

        if !status.is_success() {
            return Err(BackendError::NonSuccess {
                status: status.as_u16(),
                body: text,
            });
        }

        BackendResponse::from_body(&text)
    }
}

/// Root `path` under `prefix`.
///
/// Paths already starting with the prefix are returned unchanged; others get
/// the prefix and exactly one separating slash.
pub fn normalize_path(path: &str, prefix: &str) -> String {
    if path.starts_with(prefix) {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}/{path}")
    }
}

impl BackendError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Unreachable(_) => "unreachable",
            BackendError::NonSuccess { .. } => "non_success",
            BackendError::EmptyResponse => "empty",
            BackendError::MalformedJson(_) => "malformed",
            BackendError::Client(_) => "client",
        }
    }
}

fn header_name(name: &str) -> BackendResult<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| BackendError::Client(format!("invalid header name '{name}': {e}")))
}

fn header_value(value: &str, field: &str) -> BackendResult<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|e| BackendError::Client(format!("invalid value for {field}: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> BackendClient {
        let config = BackendConfig {
            base_url: base_url.to_string(),
            ..BackendConfig::default()
        };
        BackendClient::new(&config, &TimeoutConfig::default()).unwrap()
    }

    #[test]
    fn relative_path_gets_prefix() {
        assert_eq!(normalize_path("foo/bar", "/api"), "/api/foo/bar");
        assert_eq!(normalize_path("/foo/bar", "/api"), "/api/foo/bar");
    }

    #[test]
    fn prefixed_path_is_not_doubled() {
        assert_eq!(normalize_path("/api/foo", "/api"), "/api/foo");
        assert_eq!(normalize_path("/api", "/api"), "/api");
    }

    #[test]
    fn endpoint_url_joins_base_and_path() {
        let client = client("http://localhost:8000/");
        assert_eq!(client.endpoint_url("foo/bar"), "http://localhost:8000/api/foo/bar");
        assert_eq!(client.endpoint_url("/api/foo"), "http://localhost:8000/api/foo");
    }

    #[test]
    fn credentials_land_in_static_headers() {
        let config = BackendConfig {
            api_key: "k-123".into(),
            bearer_token: "tok".into(),
            ..BackendConfig::default()
        };
        let client = BackendClient::new(&config, &TimeoutConfig::default()).unwrap();

        assert_eq!(client.static_headers.get("authKey").unwrap(), "k-123");
        assert_eq!(client.static_headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert_eq!(client.static_headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn empty_credentials_are_omitted() {
        let client = client("http://localhost:8000");
        assert!(client.static_headers.get("authKey").is_none());
        assert!(client.static_headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn illegal_credential_is_rejected() {
        let config = BackendConfig {
            api_key: "bad\nkey".into(),
            ..BackendConfig::default()
        };
        let err = BackendClient::new(&config, &TimeoutConfig::default()).unwrap_err();
        assert!(matches!(err, BackendError::Client(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(&format!("http://{addr}"));
        let err = client.post("ping", &BackendBody::new()).await.unwrap_err();
        assert!(matches!(err, BackendError::Unreachable(_)));
        assert_eq!(err.kind(), "unreachable");
    }
}
