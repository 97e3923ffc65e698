// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Presentation sink interface
//!
//! The session controller pushes render commands through this trait and
//! never depends on the presentation layer for correctness. While no sink
//! is attached, every render command is a no-op; the conversation log stays
//! authoritative either way.

use crate::conversation::{ContentKind, MessageHandle, Role};

/// Render commands consumed by the excluded presentation layer
///
/// Credential submission does not flow back through this trait: the sink
/// only surfaces the prompt, and the submitted secret returns to the
/// controller as a [`crate::session::SessionCommand::SubmitCredential`].
pub trait PresentationSink: Send {
    /// Display a newly appended message
    fn render_message(&mut self, role: Role, content: &str, kind: ContentKind);

    /// Retract a previously rendered message
    fn remove_message(&mut self, handle: MessageHandle);

    /// Show or hide the pending-request indicator
    fn set_pending_indicator(&mut self, visible: bool);

    /// Ask the user for the completion-service credential
    fn prompt_for_credential(&mut self);
}
