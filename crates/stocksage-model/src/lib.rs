// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod types;
mod error;
mod provider;
mod google;
mod mock;

pub use types::*;
pub use error::ModelError;
pub use provider::ModelProvider;
pub use google::GoogleProvider;
pub use mock::{MockProvider, ScriptedMockProvider};

use std::sync::Arc;

use anyhow::bail;
use stocksage_config::ModelConfig;

/// Construct a shared [`ModelProvider`] from configuration.
///
/// Provider selection:
/// - `"google"` → [`GoogleProvider`]
/// - `"mock"` → [`MockProvider`] (echo-back, no network)
pub fn from_config(cfg: &ModelConfig) -> anyhow::Result<Arc<dyn ModelProvider>> {
    match cfg.provider.as_str() {
        "google" => {
            let generation = GenerationConfig {
                temperature: cfg.temperature,
                top_k: cfg.top_k,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_output_tokens,
            };
            let provider = GoogleProvider::new(
                cfg.name.clone(),
                cfg.resolve_api_key(),
                cfg.base_url.clone(),
                generation,
                cfg.timeout(),
            )?;
            Ok(Arc::new(provider))
        }
        "mock" => Ok(Arc::new(MockProvider)),
        other => bail!("unknown model provider: {other}"),
    }
}
