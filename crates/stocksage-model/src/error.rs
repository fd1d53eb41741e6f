// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use thiserror::Error;

/// Failure of a single upstream generation call.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No API key could be resolved from config or environment.
    #[error("no API key configured (set GEMINI_API_KEY or model.api_key_env)")]
    MissingApiKey,
    /// Connection, timeout, or body-read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ModelError {
    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "credentials",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }

    /// Whether resending the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => {
                matches!(*status, 408 | 429) || (500..600).contains(status)
            }
            Self::MissingApiKey | Self::Decode(_) => false,
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
