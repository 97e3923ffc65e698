// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Mock completion gateway for testing
//!
//! Provides a configurable mock implementation of the CompletionGateway
//! trait that can be used in tests without making real API calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::gateway::CompletionGateway;

/// A mock completion gateway
///
/// Outcomes are returned in the order they were queued; once the queue is
/// exhausted, a fixed placeholder reply is returned. Clones share the same
/// queue, counter, and recording.
#[derive(Clone, Default)]
pub struct MockGateway {
    /// Queued outcomes, popped front-first
    outcomes: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    /// Number of `complete` invocations
    call_count: Arc<AtomicUsize>,
    /// Recorded (user_text, credential) pairs
    recorded: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockGateway {
    /// Create a mock gateway with an empty outcome queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queue a failure
    pub fn with_error(self, error: CompletionError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, outcome: Result<String, CompletionError>) {
        let mut outcomes = match self.outcomes.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        outcomes.push_back(outcome);
    }

    /// Number of times `complete` was invoked
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Snapshot of recorded (user_text, credential) pairs
    pub fn recorded(&self) -> Vec<(String, String)> {
        match self.recorded.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl CompletionGateway for MockGateway {
    async fn complete(
        &self,
        user_text: &str,
        credential: &str,
    ) -> std::result::Result<String, CompletionError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        {
            let mut recorded = match self.recorded.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            recorded.push((user_text.to_string(), credential.to_string()));
        }

        let outcome = {
            let mut outcomes = match self.outcomes.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            outcomes.pop_front()
        };

        outcome.unwrap_or_else(|| Ok("This is a mock reply.".to_string()))
    }
}
