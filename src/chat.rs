// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use anyhow::Context;
use stocksage_config::RenderMode;
use stocksage_core::{ResponseGenerator, SUGGESTED_QUESTIONS, WELCOME_MESSAGE};
use stocksage_format::SectionView;
use stocksage_model::Message;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::output::{finalise_stdout, write_stderr, write_stdout};
use crate::render::render_reply;

/// Slash commands understood by the interactive chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Quit,
    Clear,
    Help,
    Suggest,
    /// Send suggested question N (1-based).
    Ask(usize),
    /// Collapse or expand section N (1-based) of the last reply.
    Toggle(usize),
    /// Print the last reply verbatim.
    Raw,
    Unknown(String),
}

/// Parse a `/command`; `None` for ordinary chat input.
pub fn parse_command(line: &str) -> Option<ChatCommand> {
    let rest = line.trim().strip_prefix('/')?;
    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or("");
    let number = words.next().and_then(|n| n.parse::<usize>().ok());
    let cmd = match (name, number) {
        ("quit" | "exit" | "q", _) => ChatCommand::Quit,
        ("clear", _) => ChatCommand::Clear,
        ("help" | "?", _) => ChatCommand::Help,
        ("suggest", _) => ChatCommand::Suggest,
        ("ask", Some(n)) if n >= 1 => ChatCommand::Ask(n),
        ("toggle", Some(n)) if n >= 1 => ChatCommand::Toggle(n),
        ("raw", _) => ChatCommand::Raw,
        _ => ChatCommand::Unknown(line.trim().to_string()),
    };
    Some(cmd)
}

const HELP: &str = "\
Commands:
  /suggest      list suggested questions
  /ask N        send suggested question N
  /toggle N     collapse or expand section N of the last reply
  /raw          print the last reply verbatim
  /clear        start a new conversation
  /quit         leave";

/// One chat conversation.  Owns the history; the generator only borrows it.
pub struct ChatSession {
    generator: ResponseGenerator,
    history: Vec<Message>,
    render: RenderMode,
    view: SectionView,
}

impl ChatSession {
    pub fn new(generator: ResponseGenerator, render: RenderMode) -> Self {
        Self {
            generator,
            history: vec![Message::assistant(WELCOME_MESSAGE)],
            render,
            view: SectionView::new(),
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn last_reply(&self) -> Option<&str> {
        match self.history.last() {
            Some(m) if self.history.len() > 1 => Some(m.content.as_str()),
            _ => None,
        }
    }

    /// Send one user turn.  Blank input is ignored and returns `None`;
    /// otherwise the rendered reply is returned.
    pub async fn submit(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }
        let reply = self.generator.generate(&self.history, input).await;
        self.history.push(Message::user(input));
        self.history.push(Message::assistant(reply));
        self.view = SectionView::new();
        debug!(turns = self.history.len(), "reply appended to history");
        self.rendered_last()
    }

    /// Flip section `n` (1-based) of the last reply and re-render it.
    /// A number past the last section leaves the view untouched.
    pub fn toggle(&mut self, n: usize) -> Option<String> {
        let count = stocksage_format::format(self.last_reply()?).sections().count();
        if n == 0 || n > count {
            return Some(format!("No section {n}; the last reply has {count}\n"));
        }
        self.view.toggle(n - 1);
        self.rendered_last()
    }

    pub fn clear(&mut self) {
        self.history.truncate(1);
        self.view = SectionView::new();
    }

    fn rendered_last(&self) -> Option<String> {
        self.last_reply().map(|r| render_reply(r, self.render, &self.view))
    }
}

/// Answer a single question and print the reply.
pub async fn run_once(mut session: ChatSession, question: &str) -> anyhow::Result<()> {
    match session.submit(question).await {
        Some(out) => {
            write_stdout(&out);
            finalise_stdout(&out);
        }
        None => write_stderr("Nothing to ask: the question is empty."),
    }
    Ok(())
}

/// Read-eval-print loop over stdin until `/quit` or end of input.
pub async fn run_interactive(mut session: ChatSession) -> anyhow::Result<()> {
    println!("{WELCOME_MESSAGE}");
    println!("(type /help for commands)\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write_stdout("> ");
        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            println!();
            break;
        };

        let out = match parse_command(&line) {
            Some(ChatCommand::Quit) => break,
            Some(ChatCommand::Clear) => {
                session.clear();
                Some(format!("{WELCOME_MESSAGE}\n"))
            }
            Some(ChatCommand::Help) => Some(format!("{HELP}\n")),
            Some(ChatCommand::Suggest) => Some(suggestions()),
            Some(ChatCommand::Ask(n)) => match SUGGESTED_QUESTIONS.get(n - 1) {
                Some(q) => {
                    println!("> {q}");
                    session.submit(q).await
                }
                None => Some(format!("No suggested question {n}; try /suggest\n")),
            },
            Some(ChatCommand::Toggle(n)) => session.toggle(n),
            Some(ChatCommand::Raw) => session.last_reply().map(str::to_string),
            Some(ChatCommand::Unknown(cmd)) => Some(format!("Unknown command {cmd}; try /help\n")),
            None => session.submit(&line).await,
        };

        if let Some(out) = out {
            write_stdout(&out);
            finalise_stdout(&out);
            println!();
        }
    }
    Ok(())
}

fn suggestions() -> String {
    SUGGESTED_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, q)| format!("  {}. {q}\n", i + 1))
        .collect()
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
