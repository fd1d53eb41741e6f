// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ModelError;

/// Deterministic mock provider for tests and offline runs.  Echoes the last
/// `User:` line of the prompt back as the reply.
#[derive(Default)]
pub struct MockProvider;

#[async_trait]
impl crate::ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }
    fn model_name(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, ModelError> {
        let last = prompt
            .lines()
            .rev()
            .find_map(|l| l.strip_prefix("User: "))
            .unwrap_or("[no input]");
        Ok(Some(format!("MOCK: {last}")))
    }
}

type Outcome = Result<Option<String>, ModelError>;

/// A pre-scripted mock provider.  Each call to `generate` pops the next
/// outcome from the front of the queue, so tests can exercise success,
/// empty payloads and every failure category without network access.
pub struct ScriptedMockProvider {
    scripts: Mutex<VecDeque<Outcome>>,
    /// Every prompt seen by this provider, in call order.
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedMockProvider {
    pub fn new(scripts: Vec<Outcome>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Convenience: provider that always returns a single text reply.
    pub fn always_text(reply: impl Into<String>) -> Self {
        Self::new(vec![Ok(Some(reply.into()))])
    }

    /// Convenience: provider whose only call fails with the given HTTP status.
    pub fn failing_status(status: u16) -> Self {
        Self::new(vec![Err(ModelError::Status { status, body: String::new() })])
    }

    /// The most recent prompt, if any call was made.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok()?.last().cloned()
    }
}

#[async_trait]
impl crate::ModelProvider for ScriptedMockProvider {
    fn name(&self) -> &str {
        "scripted-mock"
    }
    fn model_name(&self) -> &str {
        "scripted-mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, ModelError> {
        if let Ok(mut seen) = self.prompts.lock() {
            seen.push(prompt.to_string());
        }
        let next = self.scripts.lock().ok().and_then(|mut s| s.pop_front());
        // Default fallback when all scripts are consumed
        next.unwrap_or_else(|| Ok(Some("[no more scripts]".into())))
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
