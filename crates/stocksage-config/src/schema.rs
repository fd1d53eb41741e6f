// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable consulted when neither `api_key` nor `api_key_env`
/// is configured.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Config {
    /// Copy of this config safe to print: any literal API key is masked.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.model.api_key.is_some() {
            cfg.model.api_key = Some("********".into());
        }
        cfg
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Provider identifier: "google" | "mock"
    pub provider: String,
    /// Model name forwarded to the provider API
    pub name: String,
    /// Environment variable that holds the API key (read at runtime)
    pub api_key_env: Option<String>,
    /// Explicit API key; prefer api_key_env in config files to avoid secrets
    /// in version-controlled files
    pub api_key: Option<String>,
    /// Base URL override, e.g. a local proxy.
    pub base_url: Option<String>,

    // ── Generation parameters ────────────────────────────────────────────────
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,

    /// Whole-request timeout in seconds.  `0` or unset leaves the HTTP
    /// client's own default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "google".into(),
            name: "gemini-1.5-pro-latest".into(),
            api_key_env: None,
            api_key: None,
            base_url: None,
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
            timeout_secs: Some(60),
        }
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    /// Resolve the API key: explicit value, then the configured env var, then
    /// [`DEFAULT_API_KEY_ENV`].
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(k) = &self.api_key {
            return Some(k.clone());
        }
        let env = self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
        std::env::var(env).ok().filter(|k| !k.is_empty())
    }
}

/// How assistant replies are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Split replies on `**Heading**` markers and print them as sections.
    #[default]
    Sections,
    /// Print replies verbatim.
    Raw,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Replaces the built-in system instruction.
    pub system_prompt: Option<String>,
    /// File whose contents replace the built-in system instruction.  Takes
    /// precedence over `system_prompt`.  `~` and `$VARS` are expanded.
    pub system_prompt_file: Option<String>,
    pub render: RenderMode,
}

impl ChatConfig {
    /// The configured system instruction override, if any.
    pub fn resolve_system_prompt(&self) -> anyhow::Result<Option<String>> {
        if let Some(raw) = &self.system_prompt_file {
            let path = shellexpand::full(raw)
                .with_context(|| format!("expanding system_prompt_file {raw}"))?;
            let text = std::fs::read_to_string(&*path)
                .with_context(|| format!("reading system prompt file {path}"))?;
            return Ok(Some(text));
        }
        Ok(self.system_prompt.clone())
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
