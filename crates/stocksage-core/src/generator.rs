// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::sync::Arc;

use stocksage_model::{Message, ModelError, ModelProvider};
use tracing::{debug, error, warn};

use crate::prompts::{build_prompt, APOLOGY_REPLY, EMPTY_REPLY, SYSTEM_INSTRUCTION};

/// Outcome of a successful upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The first candidate's text.
    Text(String),
    /// Well-formed response with no candidate text.
    Empty,
}

impl Reply {
    /// The text to show the user, substituting [`EMPTY_REPLY`] for an empty
    /// payload.
    pub fn into_text(self) -> String {
        match self {
            Reply::Text(t) => t,
            Reply::Empty => EMPTY_REPLY.to_string(),
        }
    }
}

/// Turns a conversation plus a new user input into an assistant reply.
///
/// Stateless between calls: the history is borrowed for the duration of one
/// call and never modified or retained.
pub struct ResponseGenerator {
    provider: Arc<dyn ModelProvider>,
    system_instruction: String,
}

impl ResponseGenerator {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider, system_instruction: SYSTEM_INSTRUCTION.to_string() }
    }

    /// Replace the built-in StockSage instruction.
    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = text.into();
        self
    }

    pub fn provider(&self) -> &dyn ModelProvider {
        self.provider.as_ref()
    }

    /// One upstream call, with failures reported by category.
    pub async fn try_generate(&self, history: &[Message], input: &str) -> Result<Reply, ModelError> {
        let prompt = build_prompt(&self.system_instruction, history, input);
        debug!(
            provider = self.provider.name(),
            model = self.provider.model_name(),
            history_len = history.len(),
            "generating reply"
        );
        match self.provider.generate(&prompt).await? {
            Some(text) if !text.is_empty() => Ok(Reply::Text(text)),
            _ => Ok(Reply::Empty),
        }
    }

    /// Total variant of [`try_generate`](Self::try_generate): never fails and
    /// never returns an empty string.  Any error becomes [`APOLOGY_REPLY`],
    /// an empty payload becomes [`EMPTY_REPLY`].
    pub async fn generate(&self, history: &[Message], input: &str) -> String {
        match self.try_generate(history, input).await {
            Ok(Reply::Empty) => {
                warn!("upstream returned no candidate text");
                EMPTY_REPLY.to_string()
            }
            Ok(reply) => reply.into_text(),
            Err(e) => {
                error!(kind = e.kind(), retryable = e.is_retryable(), "error generating chat response: {e}");
                APOLOGY_REPLY.to_string()
            }
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
