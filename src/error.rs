// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Error types for Versi
//!
//! This module defines all error types used throughout the client.

use thiserror::Error;

/// Main error type for Versi operations
#[derive(Error, Debug)]
pub enum VersiError {
    /// A submitted credential was empty or whitespace-only
    #[error("Invalid credential: must not be empty")]
    InvalidCredential,

    /// A message with empty or whitespace-only content was rejected
    #[error("Message content must not be empty")]
    EmptyMessage,

    /// A send was attempted while a completion request was already in flight
    #[error("A completion request is already pending")]
    RequestInFlight,

    /// Completion service errors
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a single completion request
///
/// All variants are recovered locally by appending one generic apology
/// message to the conversation; none are fatal to the session.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Network-level failure (timeout, DNS, connect, abort)
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("Provider rejected the request (status {status})")]
    ProviderRejected { status: u16 },

    /// The response body did not have the expected candidate shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Result type alias for Versi operations
pub type Result<T> = std::result::Result<T, VersiError>;

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credential_display() {
        let err = VersiError::InvalidCredential;
        assert!(err.to_string().contains("Invalid credential"));
    }

    #[test]
    fn test_empty_message_display() {
        let err = VersiError::EmptyMessage;
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_request_in_flight_display() {
        let err = VersiError::RequestInFlight;
        assert!(err.to_string().contains("already pending"));
    }

    #[test]
    fn test_completion_error_transport() {
        let err = CompletionError::Transport("connection refused".to_string());
        assert!(err.to_string().contains("Transport failure"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_completion_error_provider_rejected() {
        let err = CompletionError::ProviderRejected { status: 401 };
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_completion_error_malformed_response() {
        let err = CompletionError::MalformedResponse("no choices".to_string());
        assert!(err.to_string().contains("Malformed response"));
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn test_versi_error_from_completion_error() {
        let err: VersiError = CompletionError::ProviderRejected { status: 500 }.into();
        assert!(err.to_string().contains("Completion error"));
    }

    #[test]
    fn test_versi_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VersiError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_completion_error_debug() {
        let err = CompletionError::ProviderRejected { status: 429 };
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ProviderRejected"));
    }

    #[test]
    fn test_result_type_alias() {
        fn test_fn() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(test_fn().unwrap(), 42);
    }
}
