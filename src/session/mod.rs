// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Session state machine
//!
//! `SessionController` owns the conversation log and the pending-request
//! indicator, serializes outgoing completion requests, and pushes render
//! commands to an optional [`PresentationSink`]. UI events arrive as typed
//! [`SessionCommand`]s; nothing else crosses the presentation boundary.
//!
//! The network call is the single suspension point. `send` is layered over
//! `begin_send` / [`PendingCompletion::dispatch`] / `finish_send`, so a
//! caller that needs explicit control over the in-flight phase (or a test)
//! can drive the three stages separately.

mod sink;

pub use sink::PresentationSink;

use std::sync::Arc;

use crate::conversation::{ConversationLog, Message, MessageHandle};
use crate::credential::CredentialStore;
use crate::error::{CompletionError, Result};
use crate::gateway::CompletionGateway;

/// Markup fragment shown when the client needs a credential
pub const CREDENTIAL_PROMPT: &str = "<div class=\"credential-prompt\">\
To use the AI assistant, please provide your OpenAI API key. \
Your API key is stored locally and never shared.\
</div>";

/// Confirmation shown once a credential has been saved
pub const CREDENTIAL_SAVED_TEXT: &str =
    "\u{2705} API key saved! You can now ask me anything.";

/// Generic apology shown for any failed completion request
///
/// The underlying error kind is never shown to the end user; it goes to the
/// tracing sink only.
pub const COMPLETION_APOLOGY: &str =
    "Sorry, I encountered an error. Please check your API key and try again.";

/// Visibility state of the conversation surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Rest state; re-enterable indefinitely
    Closed,
    /// Surface visible and ready to send
    Open,
    /// Open, but blocked on the user supplying a credential
    AwaitingCredential,
}

/// Typed UI events delivered to the controller
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Flip the session between closed and open
    Toggle,
    /// Submit a credential entered at the prompt
    SubmitCredential(String),
    /// Submit a user message
    Send(String),
}

/// A dispatched completion request, ready to be awaited
///
/// Produced by `begin_send` after the pending slot has been claimed. The
/// outcome must be handed back to `finish_send` regardless of success, so
/// the pending indicator clears and the reply (or apology) lands in the log.
pub struct PendingCompletion {
    gateway: Arc<dyn CompletionGateway>,
    user_text: String,
    credential: String,
}

impl std::fmt::Debug for PendingCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCompletion")
            .field("user_text", &self.user_text)
            .finish_non_exhaustive()
    }
}

impl PendingCompletion {
    /// Await the completion service
    ///
    /// This is the only operation in the client that suspends.
    pub async fn dispatch(self) -> std::result::Result<String, CompletionError> {
        self.gateway
            .complete(&self.user_text, &self.credential)
            .await
    }
}

/// Session controller: state machine, log owner, request serializer
///
/// One controller exists per client context. It is an explicit value
/// constructed by the caller; teardown is dropping it (or detaching the sink
/// first so late replies render nowhere while still reaching the log).
pub struct SessionController {
    state: SessionState,
    pending: bool,
    log: ConversationLog,
    store: CredentialStore,
    gateway: Arc<dyn CompletionGateway>,
    sink: Option<Box<dyn PresentationSink>>,
    prompt_handle: Option<MessageHandle>,
}

impl SessionController {
    /// Create a controller in the closed state
    pub fn new(store: CredentialStore, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            state: SessionState::Closed,
            pending: false,
            log: ConversationLog::new(),
            store,
            gateway,
            sink: None,
            prompt_handle: None,
        }
    }

    /// Attach the presentation sink render commands are forwarded to
    pub fn attach_sink(&mut self, sink: Box<dyn PresentationSink>) {
        self.sink = Some(sink);
    }

    /// Detach the presentation sink; subsequent render commands are no-ops
    pub fn detach_sink(&mut self) {
        self.sink = None;
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a completion request is in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Read-only view of the conversation log
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Route a typed UI event to the matching operation
    pub async fn dispatch(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Toggle => self.toggle(),
            SessionCommand::SubmitCredential(secret) => self.submit_credential(&secret),
            SessionCommand::Send(text) => self.send(&text).await,
        }
    }

    /// Flip the session between closed and open
    ///
    /// Opening runs the credential check; closing never aborts an in-flight
    /// request (its reply still lands in the log, see `finish_send`).
    pub fn toggle(&mut self) -> Result<()> {
        match self.state {
            SessionState::Closed => self.open(),
            SessionState::Open | SessionState::AwaitingCredential => {
                self.state = SessionState::Closed;
                tracing::debug!("session closed");
                Ok(())
            }
        }
    }

    /// Open the session, prompting for a credential when none is stored
    pub fn open(&mut self) -> Result<()> {
        self.state = SessionState::Open;
        tracing::debug!("session opened");
        if self.store.load().is_none() {
            self.request_credential()?;
        }
        Ok(())
    }

    /// Save a submitted credential and unblock the session
    ///
    /// On success the superseded prompt message is retracted as a whole
    /// unit and a confirmation message is appended. On
    /// [`crate::error::VersiError::InvalidCredential`] nothing changes.
    pub fn submit_credential(&mut self, secret: &str) -> Result<()> {
        self.store.save(secret)?;

        if let Some(handle) = self.prompt_handle.take() {
            self.log.remove(handle);
            if let Some(sink) = self.sink.as_deref_mut() {
                sink.remove_message(handle);
            }
        }

        let confirmation = Message::assistant(CREDENTIAL_SAVED_TEXT)?;
        self.append_and_render(confirmation)?;
        self.state = SessionState::Open;
        Ok(())
    }

    /// Submit a user message and await the assistant's reply
    ///
    /// Convenience driver over `begin_send` / `dispatch` / `finish_send`.
    pub async fn send(&mut self, text: &str) -> Result<()> {
        if let Some(request) = self.begin_send(text)? {
            let outcome = request.dispatch().await;
            self.finish_send(outcome)?;
        }
        Ok(())
    }

    /// Validate and stage a send, claiming the single in-flight slot
    ///
    /// Returns `Ok(None)` for the no-dispatch cases: whitespace-only input,
    /// or no resolvable credential (which re-prompts instead). Fails with
    /// [`crate::error::VersiError::RequestInFlight`] while a request is
    /// outstanding, leaving the log untouched.
    pub fn begin_send(&mut self, text: &str) -> Result<Option<PendingCompletion>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let Some(credential) = self.store.load() else {
            self.request_credential()?;
            return Ok(None);
        };

        if self.pending {
            return Err(crate::error::VersiError::RequestInFlight);
        }

        let user_message = Message::user(trimmed)?;
        self.append_and_render(user_message)?;

        self.pending = true;
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.set_pending_indicator(true);
        }

        Ok(Some(PendingCompletion {
            gateway: Arc::clone(&self.gateway),
            user_text: trimmed.to_string(),
            credential,
        }))
    }

    /// Settle a completed request: clear pending, append reply or apology
    ///
    /// Failures are recovered locally; the error kind is logged to the
    /// tracing sink and the user sees only the generic apology. Late replies
    /// arriving after the session closed still land in the log so reopening
    /// shows them.
    pub fn finish_send(
        &mut self,
        outcome: std::result::Result<String, CompletionError>,
    ) -> Result<()> {
        self.pending = false;
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.set_pending_indicator(false);
        }

        let reply = match outcome {
            Ok(text) => Message::assistant(text)?,
            Err(error) => {
                tracing::warn!(error = %error, "completion request failed");
                Message::assistant(COMPLETION_APOLOGY)?
            }
        };
        self.append_and_render(reply)
    }

    /// Enter the awaiting-credential sub-state and surface the prompt
    ///
    /// The prompt message is pushed at most once: while a prompt is already
    /// in the log, re-prompting only re-enters the state.
    fn request_credential(&mut self) -> Result<()> {
        self.state = SessionState::AwaitingCredential;

        if self.prompt_handle.is_none() {
            let prompt = Message::assistant_rich(CREDENTIAL_PROMPT)?;
            let handle = self.append_and_render_handle(prompt)?;
            self.prompt_handle = Some(handle);
            if let Some(sink) = self.sink.as_deref_mut() {
                sink.prompt_for_credential();
            }
        }
        Ok(())
    }

    fn append_and_render(&mut self, message: Message) -> Result<()> {
        self.append_and_render_handle(message).map(|_| ())
    }

    fn append_and_render_handle(&mut self, message: Message) -> Result<MessageHandle> {
        let (role, kind) = (message.role, message.kind);
        let content = message.content.clone();
        let handle = self.log.append(message)?;
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.render_message(role, &content, kind);
        }
        Ok(handle)
    }
}
