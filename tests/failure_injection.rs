//! Failure injection tests for the relay.

use std::time::{Duration, Instant};

use sdk_rust::{ProxyRequest, RelayClient};

mod common;

#[tokio::test]
async fn empty_backend_body_is_500() {
    let backend = common::start_mock_backend(200, "   ").await;
    let (relay_addr, shutdown) = common::start_relay(&backend.base_url(), |_| {}).await;
    let client = RelayClient::new(&format!("http://{}", relay_addr));

    let envelope = client.proxy(&ProxyRequest::new("stats")).await.unwrap();

    assert_eq!(envelope.status, 500);
    assert_eq!(envelope.code, 500);
    assert!(envelope.data.is_none());
    assert_eq!(
        envelope.error.as_deref(),
        Some("Internal server error: backend returned null response")
    );

    shutdown.trigger();
}

#[tokio::test]
async fn backend_error_status_is_500_with_detail() {
    let backend = common::start_mock_backend(503, "maintenance window").await;
    let (relay_addr, shutdown) = common::start_relay(&backend.base_url(), |_| {}).await;
    let client = RelayClient::new(&format!("http://{}", relay_addr));

    let envelope = client.proxy(&ProxyRequest::new("stats")).await.unwrap();

    assert_eq!(envelope.code, 500);
    let error = envelope.error.unwrap();
    assert!(error.contains("503"), "{error}");
    assert!(error.contains("maintenance window"), "{error}");
    // single attempt, no retries
    assert_eq!(backend.requests().len(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn malformed_backend_json_is_500() {
    for body in ["<html>oops</html>", "[1, 2", "42"] {
        let backend = common::start_mock_backend(200, body).await;
        let (relay_addr, shutdown) = common::start_relay(&backend.base_url(), |_| {}).await;
        let client = RelayClient::new(&format!("http://{}", relay_addr));

        let envelope = client.proxy(&ProxyRequest::new("stats")).await.unwrap();

        assert_eq!(envelope.code, 500, "body {body:?}");
        assert!(envelope.data.is_none());
        assert!(envelope.error.unwrap().contains("malformed backend JSON"));

        shutdown.trigger();
    }
}

#[tokio::test]
async fn unreachable_backend_is_500() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);

    let (relay_addr, shutdown) = common::start_relay(&format!("http://{}", dead_addr), |_| {}).await;
    let client = RelayClient::new(&format!("http://{}", relay_addr));

    let envelope = client.proxy(&ProxyRequest::new("stats")).await.unwrap();

    assert_eq!(envelope.code, 500);
    assert!(envelope.error.unwrap().contains("backend unreachable"));

    shutdown.trigger();
}

#[tokio::test]
async fn slow_backend_is_cut_off_by_timeout() {
    let backend = common::start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, "{}".to_string())
    })
    .await;
    let (relay_addr, shutdown) = common::start_relay(&backend.base_url(), |config| {
        config.timeouts.backend_secs = 1;
    })
    .await;
    let client = RelayClient::new(&format!("http://{}", relay_addr));

    let start = Instant::now();
    let envelope = client.proxy(&ProxyRequest::new("stats")).await.unwrap();

    assert_eq!(envelope.code, 500);
    assert!(envelope.error.unwrap().contains("backend unreachable"));
    assert!(start.elapsed() < Duration::from_secs(4));

    shutdown.trigger();
}

#[tokio::test]
async fn inbound_deadline_answers_with_envelope() {
    let backend = common::start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, "{}".to_string())
    })
    .await;
    let (relay_addr, shutdown) = common::start_relay(&backend.base_url(), |config| {
        config.timeouts.backend_secs = 10;
        config.timeouts.request_secs = 1;
    })
    .await;

    let start = Instant::now();
    let response = reqwest::Client::new()
        .post(format!("http://{}/api/proxy", relay_addr))
        .json(&serde_json::json!({"path": "stats"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"error": "Internal server error: request timed out", "code": 500})
    );
    assert!(start.elapsed() < Duration::from_secs(4));

    shutdown.trigger();
}

#[tokio::test]
async fn failed_probe_reports_success_false() {
    let backend = common::start_mock_backend(500, "boom").await;
    let (relay_addr, shutdown) = common::start_relay(&backend.base_url(), |_| {}).await;
    let client = RelayClient::new(&format!("http://{}", relay_addr));

    let probe = client.test_backend().await.unwrap();

    assert_eq!(probe["success"], false);
    assert!(probe["error"].as_str().unwrap().contains("500"));
    assert!(probe.get("response").is_none());

    shutdown.trigger();
}
