// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Ordered, append-only conversation log
//!
//! Insertion order is display order. Entries are never edited in place; a
//! superseded message (the credential prompt) may be removed as a whole unit
//! via its handle.

mod message;

pub use message::{ContentKind, Message, MessageHandle, Role};

use crate::error::{Result, VersiError};

/// Append-only record of exchanged messages
///
/// Owned exclusively by the session controller for the lifetime of one
/// session context; not persisted.
#[derive(Debug, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning a stable handle usable for later removal
    ///
    /// Rejects empty or whitespace-only content. `Message` construction
    /// already upholds that invariant; the check here keeps the log safe
    /// against any future constructor.
    pub fn append(&mut self, message: Message) -> Result<MessageHandle> {
        if message.content.trim().is_empty() {
            return Err(VersiError::EmptyMessage);
        }
        let handle = message.handle();
        self.messages.push(message);
        Ok(handle)
    }

    /// Remove a message as a whole unit
    ///
    /// Returns true if the message existed and was removed. Used only to
    /// retract a superseded credential-prompt message.
    pub fn remove(&mut self, handle: MessageHandle) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != handle.id());
        self.messages.len() < before
    }

    /// Read-only snapshot in insertion order
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// Most recently appended message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Messages with the given role, in insertion order
    pub fn filter_by_role(&self, role: Role) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.role == role)
    }

    /// Number of messages in the log
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut log = ConversationLog::new();
        log.append(Message::user("first").unwrap()).unwrap();
        log.append(Message::assistant("second").unwrap()).unwrap();
        log.append(Message::user("third").unwrap()).unwrap();

        let contents: Vec<_> = log.all().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_remove_by_handle() {
        let mut log = ConversationLog::new();
        let keep = Message::user("keep").unwrap();
        let drop = Message::assistant("drop").unwrap();
        log.append(keep).unwrap();
        let handle = log.append(drop).unwrap();

        assert!(log.remove(handle));
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().unwrap().content, "keep");
    }

    #[test]
    fn test_remove_missing_handle_is_false() {
        let mut log = ConversationLog::new();
        let stray = Message::user("never appended").unwrap();
        log.append(Message::user("present").unwrap()).unwrap();

        assert!(!log.remove(stray.handle()));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut log = ConversationLog::new();
        let handle = log.append(Message::user("once").unwrap()).unwrap();

        assert!(log.remove(handle));
        assert!(!log.remove(handle));
        assert!(log.is_empty());
    }

    #[test]
    fn test_filter_by_role() {
        let mut log = ConversationLog::new();
        log.append(Message::user("q1").unwrap()).unwrap();
        log.append(Message::assistant("a1").unwrap()).unwrap();
        log.append(Message::user("q2").unwrap()).unwrap();

        let users: Vec<_> = log
            .filter_by_role(Role::User)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(users, vec!["q1", "q2"]);
        assert_eq!(log.filter_by_role(Role::System).count(), 0);
    }

    #[test]
    fn test_last() {
        let mut log = ConversationLog::new();
        assert!(log.last().is_none());

        log.append(Message::user("only").unwrap()).unwrap();
        assert_eq!(log.last().unwrap().content, "only");
    }
}
