// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Wire-format tests: spin up a minimal HTTP/1.1 mock server, point the
//! Gemini driver at it, issue a prompt, and assert both the HTTP request the
//! driver sent and the outcome it produced.
//!
//! These tests run without any API keys and without external network access.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use stocksage_config::ModelConfig;
use stocksage_model::{from_config, GenerationConfig, GoogleProvider, ModelError, ModelProvider};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

// ── Minimal HTTP/1.1 mock server ──────────────────────────────────────────────

#[derive(Debug)]
struct CapturedRequest {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: Value,
}

/// Bind a one-shot HTTP/1.1 mock server on a random loopback port.
/// It accepts exactly one request, captures it, and replies with the given
/// status + body.  Returns the port number and a receiver for the captured
/// request (fulfilled once the request has been fully read).
async fn mock_server_once(
    status: u16,
    resp_body: impl Into<String> + Send + 'static,
) -> (u16, tokio::sync::oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = tokio::sync::oneshot::channel::<CapturedRequest>();

    tokio::spawn(async move {
        let resp_body: String = resp_body.into();
        let (stream, _) = listener.accept().await.expect("accept");
        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);

        // Request line
        let mut request_line = String::new();
        reader.read_line(&mut request_line).await.unwrap();
        let mut parts = request_line.trim().splitn(3, ' ');
        let method = parts.next().unwrap_or("").to_string();
        let path = parts.next().unwrap_or("").to_string();

        // Headers
        let mut headers: HashMap<String, String> = HashMap::new();
        let mut content_length: usize = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).await.unwrap();
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            if let Some((k, v)) = trimmed.split_once(": ") {
                let key = k.to_lowercase();
                if key == "content-length" {
                    content_length = v.parse().unwrap_or(0);
                }
                headers.insert(key, v.to_string());
            }
        }

        // Body
        let mut body_bytes = vec![0u8; content_length];
        reader.read_exact(&mut body_bytes).await.unwrap();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        let _ = tx.send(CapturedRequest { method, path, headers, body });

        let http_resp = format!(
            "HTTP/1.1 {status} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            resp_body.len(),
            resp_body,
        );
        let _ = write_half.write_all(http_resp.as_bytes()).await;
    });

    (port, rx)
}

fn google_cfg(port: u16) -> ModelConfig {
    ModelConfig {
        provider: "google".into(),
        name: "gemini-1.5-pro-latest".into(),
        api_key: Some("test-key".into()),
        base_url: Some(format!("http://127.0.0.1:{port}")),
        ..ModelConfig::default()
    }
}

const OK_BODY: &str =
    r#"{"candidates":[{"content":{"parts":[{"text":"**Market Trends**\nUp."}],"role":"model"}}]}"#;

// ── Request shape ────────────────────────────────────────────────────────────

#[tokio::test]
async fn google_sends_correct_request() {
    let (port, req_rx) = mock_server_once(200, OK_BODY).await;
    let provider = from_config(&google_cfg(port)).unwrap();

    provider.generate("System\n\nUser: hello").await.unwrap();

    let req = req_rx.await.unwrap();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/v1beta/models/gemini-1.5-pro-latest:generateContent");
    assert_eq!(req.headers.get("x-goog-api-key").map(String::as_str), Some("test-key"));
    assert!(req.headers.get("content-type").unwrap().contains("application/json"));

    let contents = req.body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0]["parts"][0]["text"], "System\n\nUser: hello");

    let gen = &req.body["generationConfig"];
    assert_eq!(gen["topK"], 40);
    assert_eq!(gen["maxOutputTokens"], 1024);
    assert!((gen["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert!((gen["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
}

#[tokio::test]
async fn google_forwards_configured_generation_params() {
    let (port, req_rx) = mock_server_once(200, OK_BODY).await;
    let cfg = ModelConfig {
        temperature: 0.0,
        top_k: 1,
        max_output_tokens: 64,
        ..google_cfg(port)
    };
    from_config(&cfg).unwrap().generate("x").await.unwrap();

    let req = req_rx.await.unwrap();
    assert_eq!(req.body["generationConfig"]["topK"], 1);
    assert_eq!(req.body["generationConfig"]["maxOutputTokens"], 64);
    assert_eq!(req.body["generationConfig"]["temperature"].as_f64(), Some(0.0));
}

// ── Response handling ────────────────────────────────────────────────────────

#[tokio::test]
async fn google_returns_first_candidate_text() {
    let (port, _rx) = mock_server_once(200, OK_BODY).await;
    let reply = from_config(&google_cfg(port)).unwrap().generate("q").await.unwrap();
    assert_eq!(reply.as_deref(), Some("**Market Trends**\nUp."));
}

#[tokio::test]
async fn google_empty_candidates_is_none() {
    let (port, _rx) = mock_server_once(200, r#"{"candidates":[]}"#).await;
    let reply = from_config(&google_cfg(port)).unwrap().generate("q").await.unwrap();
    assert!(reply.is_none());
}

#[tokio::test]
async fn google_blocked_prompt_is_none() {
    let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
    let (port, _rx) = mock_server_once(200, body).await;
    let reply = from_config(&google_cfg(port)).unwrap().generate("q").await.unwrap();
    assert!(reply.is_none());
}

#[tokio::test]
async fn google_error_status_is_surfaced() {
    let body = r#"{"error":{"code":403,"message":"API key not valid"}}"#;
    let (port, _rx) = mock_server_once(403, body).await;
    let err = from_config(&google_cfg(port)).unwrap().generate("q").await.unwrap_err();
    match &err {
        ModelError::Status { status, body } => {
            assert_eq!(*status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn google_rate_limit_is_retryable() {
    let (port, _rx) = mock_server_once(429, r#"{"error":{"code":429}}"#).await;
    let err = from_config(&google_cfg(port)).unwrap().generate("q").await.unwrap_err();
    assert!(matches!(err, ModelError::Status { status: 429, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn google_non_json_body_is_decode_error() {
    let (port, _rx) = mock_server_once(200, "<html>gateway</html>").await;
    let err = from_config(&google_cfg(port)).unwrap().generate("q").await.unwrap_err();
    assert_eq!(err.kind(), "decode");
}

#[tokio::test]
async fn google_connection_refused_is_transport_error() {
    // Reserve a port, then free it so nothing is listening.
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap().port()
    };
    let err = from_config(&google_cfg(port)).unwrap().generate("q").await.unwrap_err();
    assert_eq!(err.kind(), "transport");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn google_timeout_is_enforced() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        // Accept and hold the connection open without answering.
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
    });

    let provider = GoogleProvider::new(
        "gemini-1.5-pro-latest".into(),
        Some("k".into()),
        Some(format!("http://127.0.0.1:{port}")),
        GenerationConfig::default(),
        Some(Duration::from_millis(200)),
    )
    .unwrap();

    let err = provider.generate("q").await.unwrap_err();
    match &err {
        ModelError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected transport timeout, got {other:?}"),
    }
    assert!(err.is_retryable());
}
