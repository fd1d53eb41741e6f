// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use stocksage_config::{Config, RenderMode};

#[derive(Parser, Debug)]
#[command(
    name = "stocksage",
    about = "Ask an AI stock market assistant from the terminal",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Ask a single question and exit.  Without it an interactive chat
    /// starts (or, when stdin is piped, stdin is read as the question).
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Model to use, e.g. "gemini-1.5-flash" or "mock/any"
    #[arg(long, short = 'M', env = "STOCKSAGE_MODEL")]
    pub model: Option<String>,

    /// Path to config file (layered on top of auto-discovered files)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// How replies are printed (sections | raw)
    #[arg(long, value_enum)]
    pub render: Option<RenderMode>,

    /// Replace the built-in system instruction with the contents of a file.
    #[arg(long, value_name = "PATH")]
    pub system_prompt_file: Option<PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the effective configuration (API key masked) and exit
    ShowConfig,
}

impl Cli {
    /// Fold command-line overrides into the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(spec) = &self.model {
            apply_model_override(config, spec);
        }
        if let Some(mode) = self.render {
            config.chat.render = mode;
        }
        if let Some(path) = &self.system_prompt_file {
            config.chat.system_prompt_file = Some(path.display().to_string());
        }
    }
}

/// `"name"` sets the model name; `"provider/name"` sets both.
fn apply_model_override(config: &mut Config, spec: &str) {
    match spec.split_once('/') {
        Some((provider, name)) if !provider.is_empty() => {
            config.model.provider = provider.to_string();
            if !name.is_empty() {
                config.model.name = name.to_string();
            }
        }
        _ => config.model.name = spec.to_string(),
    }
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "stocksage", &mut std::io::stdout());
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
