// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Message types for the conversation log
//!
//! A `Message` is immutable once created and carries an opaque id used for
//! whole-unit removal. Construction rejects empty or whitespace-only content,
//! so an empty message can never enter a log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, VersiError};

/// A single entry in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// Role of the message sender
    pub role: Role,

    /// Content of the message
    pub content: String,

    /// How the content should be interpreted by the presentation layer
    pub kind: ContentKind,

    /// When the message was created
    pub created_at: DateTime<Utc>,
}

/// Role of the message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant response
    Assistant,
    /// System prompt
    System,
}

/// Interpretation of message content
///
/// `Rich` marks a markup fragment and is only produced for
/// assistant-originated prompts (the credential request); everything else
/// is plain text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Plain text content
    Text,
    /// Markup fragment rendered by the presentation layer
    Rich,
}

/// Stable reference to a message in a log
///
/// Handles stay valid across later appends and removals of other messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle(Uuid);

impl MessageHandle {
    pub(crate) fn id(&self) -> Uuid {
        self.0
    }
}

impl Message {
    /// Create a new message
    ///
    /// Fails with [`VersiError::EmptyMessage`] when the trimmed content is
    /// empty.
    pub fn new(role: Role, content: impl Into<String>, kind: ContentKind) -> Result<Self> {
        let content: String = content.into();
        if content.trim().is_empty() {
            return Err(VersiError::EmptyMessage);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            role,
            content,
            kind,
            created_at: Utc::now(),
        })
    }

    /// Create a new plain-text user message
    pub fn user(content: impl Into<String>) -> Result<Self> {
        Self::new(Role::User, content, ContentKind::Text)
    }

    /// Create a new plain-text assistant message
    pub fn assistant(content: impl Into<String>) -> Result<Self> {
        Self::new(Role::Assistant, content, ContentKind::Text)
    }

    /// Create an assistant message carrying a markup fragment
    pub fn assistant_rich(markup: impl Into<String>) -> Result<Self> {
        Self::new(Role::Assistant, markup, ContentKind::Rich)
    }

    /// Get a stable handle for later removal
    pub fn handle(&self) -> MessageHandle {
        MessageHandle(self.id)
    }
}
