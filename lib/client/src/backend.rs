//! Backend abstraction used by the session manager.

use crate::error::RequestError;
use crate::wire::{HistoryResponse, SendMessageRequest, SendMessageResponse};
use async_trait::async_trait;
use krx_chat_core::ConversationId;

/// Trait for the assistant service as seen by a chat session.
///
/// Each call performs at most one exchange and never retries.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one user turn and returns the assistant reply.
    ///
    /// # Errors
    ///
    /// Returns a classified error if the exchange fails or times out.
    async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<SendMessageResponse, RequestError>;

    /// Fetches the stored messages of a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NotFound`] if the server does not know the id.
    async fn fetch_history(&self, id: &ConversationId) -> Result<HistoryResponse, RequestError>;
}
