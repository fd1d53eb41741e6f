// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Google Gemini driver for the native Generative Language API.
//!
//! Uses the non-streaming `generateContent` endpoint: the whole prompt goes
//! out as a single text part and the reply is read from the first candidate.
//!
//! # Auth
//! API key via `x-goog-api-key` header.
//!
//! # Endpoint pattern
//! `POST https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent`

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{GenerationConfig, ModelError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    model: String,
    api_key: Option<String>,
    base_url: String,
    generation: GenerationConfig,
    client: reqwest::Client,
}

impl GoogleProvider {
    /// `timeout` bounds the whole request; `None` keeps reqwest's default.
    pub fn new(
        model: String,
        api_key: Option<String>,
        base_url: Option<String>,
        generation: GenerationConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, ModelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            model,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            generation,
            client: builder.build()?,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl crate::ModelProvider for GoogleProvider {
    fn name(&self) -> &str { "google" }
    fn model_name(&self) -> &str { &self.model }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, ModelError> {
        let key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;
        let body = request_body(prompt, &self.generation);

        debug!(model = %self.model, prompt_chars = prompt.len(), "sending Google Gemini request");

        let resp = self.client
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %text, "Google Gemini API error");
            return Err(ModelError::Status { status: status.as_u16(), body: text });
        }

        let text = resp.text().await?;
        let v: Value = serde_json::from_str(&text)?;
        Ok(first_candidate_text(&v))
    }
}

/// Build the `generateContent` request body for a single-text prompt.
fn request_body(prompt: &str, generation: &GenerationConfig) -> Value {
    json!({
        "contents": [
            { "parts": [ { "text": prompt } ] }
        ],
        "generationConfig": generation,
    })
}

/// `candidates[0].content.parts[0].text`, treating an empty string like a
/// missing one.
fn first_candidate_text(v: &Value) -> Option<String> {
    v["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelProvider;

    fn provider(base_url: Option<String>) -> GoogleProvider {
        GoogleProvider::new(
            "gemini-1.5-pro-latest".into(),
            Some("k".into()),
            base_url,
            GenerationConfig::default(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn provider_name() {
        let p = provider(None);
        assert_eq!(p.name(), "google");
        assert_eq!(p.model_name(), "gemini-1.5-pro-latest");
    }

    #[test]
    fn endpoint_uses_model_and_trims_slash() {
        let p = provider(Some("http://localhost:9999/".into()));
        assert_eq!(
            p.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-1.5-pro-latest:generateContent"
        );
    }

    #[test]
    fn request_body_shape() {
        let body = request_body("hello", &GenerationConfig::default());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["generationConfig"]["topK"], 40);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn candidate_text_extracted() {
        let v = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hello" }, { "text": "ignored" }] }
            }]
        });
        assert_eq!(first_candidate_text(&v).as_deref(), Some("hello"));
    }

    #[test]
    fn missing_candidates_yield_none() {
        assert!(first_candidate_text(&json!({})).is_none());
        assert!(first_candidate_text(&json!({ "candidates": [] })).is_none());
        assert!(first_candidate_text(&json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .is_none());
    }

    #[test]
    fn empty_candidate_text_yields_none() {
        let v = json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] });
        assert!(first_candidate_text(&v).is_none());
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let p = GoogleProvider::new(
            "m".into(),
            None,
            Some("http://127.0.0.1:9".into()),
            GenerationConfig::default(),
            None,
        )
        .unwrap();
        let err = p.generate("hi").await.unwrap_err();
        assert!(matches!(err, ModelError::MissingApiKey));
    }
}
