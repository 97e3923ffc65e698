// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Credential storage
//!
//! Persists the single completion-service credential as one key-value pair:
//! the key is the fixed literal [`crate::config::CREDENTIAL_KEY`], the value
//! is the raw trimmed secret. The durable backing is a plain-text file under
//! the app home directory, mirroring the original deployment's localStorage
//! entry; see the README security note before reusing this scheme elsewhere.

use std::path::PathBuf;

use crate::config;
use crate::error::{Result, VersiError};

/// Store for the single completion-service credential
///
/// Holds an in-memory copy for the life of the session and mirrors it to the
/// durable file on save. Reads prefer the cache and fall back to the file.
#[derive(Debug)]
pub struct CredentialStore {
    dir: PathBuf,
    cached: Option<String>,
}

impl CredentialStore {
    /// Open the store at the default location (~/.versi)
    pub fn open() -> Result<Self> {
        Self::with_dir(config::app_home())
    }

    /// Open the store at a specific directory
    ///
    /// Used by tests to isolate durable state.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, cached: None })
    }

    fn key_path(&self) -> PathBuf {
        self.dir.join(config::CREDENTIAL_KEY)
    }

    /// Save a credential, overwriting any prior value
    ///
    /// The secret is trimmed before storage. Fails with
    /// [`VersiError::InvalidCredential`] when the trimmed secret is empty;
    /// neither the cache nor the durable value changes in that case.
    pub fn save(&mut self, secret: &str) -> Result<()> {
        let trimmed = secret.trim();
        if trimmed.is_empty() {
            return Err(VersiError::InvalidCredential);
        }

        std::fs::write(self.key_path(), trimmed)?;
        self.cached = Some(trimmed.to_string());
        tracing::debug!("credential saved to durable store");
        Ok(())
    }

    /// Load the credential, if one has ever been saved
    ///
    /// Returns the in-memory value when present, otherwise reads the durable
    /// file. Unreadable durable state is treated as absent.
    pub fn load(&mut self) -> Option<String> {
        if let Some(ref cached) = self.cached {
            return Some(cached.clone());
        }

        match std::fs::read_to_string(self.key_path()) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let value = trimmed.to_string();
                self.cached = Some(value.clone());
                Some(value)
            }
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(error = %err, "credential store unreadable, treating as absent");
                }
                None
            }
        }
    }

    /// Remove the credential from memory and durable storage
    ///
    /// Idempotent; clearing an empty store succeeds.
    pub fn clear(&mut self) -> Result<()> {
        self.cached = None;
        match std::fs::remove_file(self.key_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_before_any_save_is_none() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::with_dir(dir.path()).unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_trims_value() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::with_dir(dir.path()).unwrap();

        store.save("  sk-test-123  ").unwrap();
        assert_eq!(store.load().as_deref(), Some("sk-test-123"));
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::with_dir(dir.path()).unwrap();

        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load().as_deref(), Some("second"));
    }

    #[test]
    fn test_whitespace_credential_rejected_without_side_effects() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::with_dir(dir.path()).unwrap();
        store.save("abc123").unwrap();

        let err = store.save("   ").unwrap_err();
        assert!(matches!(err, VersiError::InvalidCredential));
        assert_eq!(store.load().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::with_dir(dir.path()).unwrap();

        store.clear().unwrap();
        store.save("abc").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_durable_across_instances() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = CredentialStore::with_dir(dir.path()).unwrap();
            store.save("persisted").unwrap();
        }

        let mut reopened = CredentialStore::with_dir(dir.path()).unwrap();
        assert_eq!(reopened.load().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_durable_file_uses_fixed_key() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::with_dir(dir.path()).unwrap();
        store.save("abc").unwrap();

        assert!(dir.path().join(config::CREDENTIAL_KEY).exists());
    }
}
