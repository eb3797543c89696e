//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate config, token and storage calls into editor-facing APIs.
//! - Keep the host presentation layer decoupled from persistence details.

pub mod session;
