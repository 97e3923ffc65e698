// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Versi - conversational assistant client for the Versico site.
//!
//! This crate is the stateful core behind the site's chat widget:
//! - `session`: session lifecycle state machine and request serialization
//! - `conversation`: ordered, append-only message log
//! - `gateway`: one-shot completion dispatch against the provider
//! - `credential`: the single long-lived completion-service credential
//!
//! The presentation layer is external: it delivers typed
//! [`session::SessionCommand`]s and implements [`session::PresentationSink`]
//! to consume render commands. The bundled binary (`src/main.rs`) is a
//! terminal stand-in for the site widget.

pub mod cli;
pub mod config;
pub mod conversation;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod session;

pub use error::{Result, VersiError};
