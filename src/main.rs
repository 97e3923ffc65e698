// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Versi - Versico's assistant in your terminal
//!
//! A line-oriented front-end standing in for the site widget: it attaches a
//! terminal PresentationSink to the session core and relays typed lines as
//! session commands.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;

use versi::cli::Cli;
use versi::conversation::{ContentKind, MessageHandle, Role};
use versi::credential::CredentialStore;
use versi::error::{Result, VersiError};
use versi::gateway::OpenAiGateway;
use versi::session::{PresentationSink, SessionCommand, SessionController, SessionState};

/// Renders session output on stdout
///
/// A terminal cannot retract already-printed lines, so `remove_message` is a
/// no-op; the conversation log stays authoritative regardless.
struct TerminalSink;

impl PresentationSink for TerminalSink {
    fn render_message(&mut self, role: Role, content: &str, kind: ContentKind) {
        match (role, kind) {
            // The terminal already echoes what the user typed.
            (Role::User, _) => {}
            // Rich fragments target the web widget; the credential prompt
            // is surfaced through prompt_for_credential instead.
            (_, ContentKind::Rich) => {}
            (Role::Assistant | Role::System, ContentKind::Text) => {
                println!("versi> {}", content);
            }
        }
    }

    fn remove_message(&mut self, _handle: MessageHandle) {}

    fn set_pending_indicator(&mut self, visible: bool) {
        if visible {
            println!("versi> ...");
        }
    }

    fn prompt_for_credential(&mut self) {
        println!("versi> To use the AI assistant, please provide your OpenAI API key.");
        println!("versi> It is stored locally in ~/.versi and never shared.");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // Practical debug toggle: `-v` enables client diagnostics without
    // requiring users to know target names. `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        for directive in ["versi::session=debug", "versi::gateway=debug"] {
            if let Ok(parsed) = directive.parse() {
                env_filter = env_filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut store = CredentialStore::open()?;

    if cli.forget_key {
        store.clear()?;
        println!("Stored API key removed.");
        return Ok(());
    }

    let gateway = Arc::new(OpenAiGateway::new());
    let mut controller = SessionController::new(store, gateway);
    controller.attach_sink(Box::new(TerminalSink));

    println!("Versi - Versico assistant. Type a question, or /quit to leave.");
    controller.dispatch(SessionCommand::Toggle).await?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("you> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input == "/quit" || input == "/exit" {
            break;
        }

        let command = match controller.state() {
            SessionState::AwaitingCredential => SessionCommand::SubmitCredential(input.to_string()),
            _ => SessionCommand::Send(input.to_string()),
        };

        match controller.dispatch(command).await {
            Ok(()) => {}
            Err(VersiError::InvalidCredential) => {
                println!("versi> Please enter a valid API key.");
            }
            Err(err) => return Err(err),
        }
    }

    controller.detach_sink();
    Ok(())
}
