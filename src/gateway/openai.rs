// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! OpenAI chat-completions gateway
//!
//! Implements the CompletionGateway trait against the OpenAI-compatible
//! chat completions endpoint with the fixed request parameters from
//! [`crate::config`]. No retries are performed here; a failed call surfaces
//! once and the user resends manually.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::CompletionError;
use crate::gateway::CompletionGateway;

/// HTTP gateway to the completion provider
pub struct OpenAiGateway {
    client: Client,
    base_url: String,
    timeout: Duration,
}

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

/// One turn in the upstream request
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiGateway {
    /// Create a gateway against the production endpoint
    pub fn new() -> Self {
        Self::with_base_url(config::COMPLETION_API_URL)
    }

    /// Create a gateway against a custom endpoint URL
    ///
    /// Used by tests to point at a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_base_url_and_timeout(base_url, config::REQUEST_TIMEOUT)
    }

    /// Create a gateway with a custom endpoint URL and request timeout
    ///
    /// Used by tests to exercise the bounded-wait path without waiting out
    /// the production timeout.
    pub fn with_base_url_and_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }

    fn build_request<'a>(&self, user_text: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: config::MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: config::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            max_tokens: config::MAX_TOKENS,
            temperature: config::TEMPERATURE,
        }
    }
}

impl Default for OpenAiGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionGateway for OpenAiGateway {
    async fn complete(
        &self,
        user_text: &str,
        credential: &str,
    ) -> std::result::Result<String, CompletionError> {
        let body = self.build_request(user_text);

        // Bounded wait: an unbounded hang would hold the single in-flight
        // slot forever. Expiry is reported as a transport failure.
        let response = self
            .client
            .post(&self.base_url)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", credential))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "provider rejected request");
            return Err(CompletionError::ProviderRejected {
                status: status.as_u16(),
            });
        }

        let raw = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            CompletionError::MalformedResponse("no choices in response".to_string())
        })?;

        let text = choice
            .message
            .content
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(CompletionError::MalformedResponse(
                "empty candidate content".to_string(),
            ));
        }

        Ok(text.to_string())
    }
}
