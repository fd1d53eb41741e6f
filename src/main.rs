mod chat;
mod cli;
mod output;
mod render;

use std::io::{self, Read};

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use chat::ChatSession;
use cli::{Cli, Commands};
use stocksage_config::Config;
use stocksage_core::ResponseGenerator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Handle subcommands first
    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Completions { shell } => {
                cli::print_completions(*shell);
                return Ok(());
            }
            Commands::ShowConfig => {
                let mut config = stocksage_config::load(cli.config.as_deref())?;
                cli.apply_overrides(&mut config);
                println!("{}", serde_yaml::to_string(&config.redacted())?);
                return Ok(());
            }
        }
    }

    let mut config = stocksage_config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let session = ChatSession::new(build_generator(&config)?, config.chat.render);

    if let Some(prompt) = &cli.prompt {
        chat::run_once(session, prompt).await
    } else if !is_stdin_tty() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        chat::run_once(session, buf.trim_end()).await
    } else {
        chat::run_interactive(session).await
    }
}

fn build_generator(config: &Config) -> anyhow::Result<ResponseGenerator> {
    if config.model.provider == "google" && config.model.resolve_api_key().is_none() {
        warn!(
            "no API key found; set GEMINI_API_KEY or model.api_key_env, \
             every request will fail until then"
        );
    }
    let provider = stocksage_model::from_config(&config.model)?;
    let mut generator = ResponseGenerator::new(provider);
    if let Some(system) = config.chat.resolve_system_prompt()? {
        generator = generator.with_system_instruction(system);
    }
    Ok(generator)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn is_stdin_tty() -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(io::stdin().as_raw_fd()) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
