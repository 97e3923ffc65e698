// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Fixed configuration for the assistant client
//!
//! Every request parameter is a compile-time constant: the client talks to
//! exactly one completion provider with one model, one persona, and one set
//! of sampling parameters. Nothing here is runtime-tunable.

use std::path::PathBuf;
use std::time::Duration;

/// Chat completions endpoint of the completion provider
pub const COMPLETION_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model identifier sent with every request
pub const MODEL: &str = "gpt-3.5-turbo";

/// Upper bound on generated tokens per reply
pub const MAX_TOKENS: u32 = 300;

/// Sampling temperature sent with every request
pub const TEMPERATURE: f32 = 0.7;

/// Total wall-clock budget for one completion request
///
/// The upstream contract requires a bounded wait so a hung request cannot
/// hold the single in-flight slot forever. Expiry surfaces as a transport
/// failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Durable storage key for the completion-service credential
///
/// Also the file name of the credential inside the app home directory.
pub const CREDENTIAL_KEY: &str = "openai_api_key";

/// Static persona block sent as the system turn of every request
pub const SYSTEM_PROMPT: &str = "\
You are an AI assistant for Versico, a student productivity platform created by Rushal.

About Versico:
- Offers student productivity systems and Notion dashboards
- Services include Personal Dashboard, Career Support, Doubt Solving Help, and Tool Library
- Pricing: Starter (\u{20b9}199), Essential (\u{20b9}399), Premium (\u{20b9}799)
- Also offers \"Neural Blackbook\" for \u{20b9}399
- Created by Rushal, an IIM student

Be helpful, friendly, and knowledgeable about student productivity, study techniques, \
and Versico's services. Keep responses concise and actionable.";

/// Get the Versi home directory (~/.versi)
pub fn app_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".versi")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parameters_are_fixed() {
        assert_eq!(MODEL, "gpt-3.5-turbo");
        assert_eq!(MAX_TOKENS, 300);
        assert!((TEMPERATURE - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_timeout_is_bounded() {
        assert!(REQUEST_TIMEOUT > Duration::ZERO);
        assert!(REQUEST_TIMEOUT <= Duration::from_secs(120));
    }

    #[test]
    fn test_system_prompt_mentions_offering() {
        assert!(SYSTEM_PROMPT.contains("Versico"));
        assert!(SYSTEM_PROMPT.contains("Starter"));
        assert!(SYSTEM_PROMPT.contains("Premium"));
    }

    #[test]
    fn test_app_home_ends_with_versi() {
        assert!(app_home().ends_with(".versi"));
    }
}
