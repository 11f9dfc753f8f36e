//! HTTP client for the KRX chat assistant service.
//!
//! This crate provides:
//!
//! - **Wire types**: request and response bodies of the `/api/chat` endpoints
//! - **Chat backend**: the trait the session manager talks to
//! - **Chat client**: a `reqwest` implementation that runs one exchange per
//!   call under a fixed timeout and classifies every failure

pub mod backend;
pub mod client;
pub mod error;
pub mod wire;

pub use backend::ChatBackend;
pub use client::{ChatClient, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::RequestError;
pub use wire::{
    ConversationSummary, HealthStatus, HistoryMessage, HistoryResponse, SendMessageRequest,
    SendMessageResponse,
};
