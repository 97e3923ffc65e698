// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Completion gateway
//!
//! Builds and issues one completion request against the external provider
//! and maps transport/provider failures to typed errors. The gateway is
//! stateless across calls: only the fixed persona block and the single user
//! turn are sent upstream, never prior conversation turns.

mod mock;
mod openai;

pub use mock::MockGateway;
pub use openai::OpenAiGateway;

use async_trait::async_trait;

use crate::error::CompletionError;

/// One-shot completion dispatch
///
/// Callers must not invoke `complete` twice concurrently; the session
/// controller enforces the single-outstanding-request invariant.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Issue one completion request authorized by `credential`
    ///
    /// Returns the first candidate's text content, trimmed and non-empty.
    async fn complete(
        &self,
        user_text: &str,
        credential: &str,
    ) -> std::result::Result<String, CompletionError>;
}
