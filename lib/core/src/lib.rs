//! Core types and utilities for the KRX chat client.
//!
//! This crate provides the identifiers, message roles, language selection
//! and the error handling foundation shared by the HTTP client, the session
//! manager and the terminal front-end.

pub mod error;
pub mod id;
pub mod language;
pub mod role;

pub use error::Result;
pub use id::{ConversationId, ParseIdError, RequestId};
pub use language::{Language, UnknownLanguage};
pub use role::MessageRole;
