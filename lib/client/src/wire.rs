//! JSON bodies exchanged with the `/api/chat` endpoints.

use chrono::NaiveDateTime;
use krx_chat_core::{ConversationId, Language, MessageRole};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// The user's text, already trimmed.
    pub message: String,
    /// Conversation to continue; `null` asks the server to start one.
    pub conversation_id: Option<ConversationId>,
    /// Language the reply should be written in.
    pub language: Language,
}

impl SendMessageRequest {
    /// Creates a request body.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        conversation_id: Option<ConversationId>,
        language: Language,
    ) -> Self {
        Self {
            message: message.into(),
            conversation_id,
            language,
        }
    }
}

/// Successful reply to `POST /api/chat/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    /// Conversation the message was recorded in.
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
    /// Assistant reply text, unsanitized.
    pub response: String,
    /// Server id of the stored assistant message.
    #[serde(default)]
    pub message_id: Option<String>,
}

impl SendMessageResponse {
    /// Returns the conversation id if the server sent a usable one.
    #[must_use]
    pub fn issued_conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref().filter(|id| !id.is_blank())
    }
}

/// Successful reply to `GET /api/chat/history/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// The conversation id echoed by the server.
    #[serde(default)]
    pub id: Option<ConversationId>,
    /// Title generated from the first message.
    #[serde(default)]
    pub title: Option<String>,
    /// Messages in server order.
    pub messages: Vec<HistoryMessage>,
}

/// One stored message in a history reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Server id of the message.
    #[serde(default)]
    pub id: Option<String>,
    /// Who sent the message.
    pub role: MessageRole,
    /// Raw message text.
    pub content: String,
    /// Server-side creation time, without zone.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// One entry of `GET /api/chat/conversations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Conversation id.
    pub id: ConversationId,
    /// Title generated from the first message.
    #[serde(default)]
    pub title: Option<String>,
    /// When the conversation was created.
    pub created_at: NaiveDateTime,
    /// When the conversation last changed.
    pub updated_at: NaiveDateTime,
    /// Number of stored messages.
    pub message_count: u32,
}

/// Reply to `GET /api/chat/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` when the service is up.
    pub status: String,
    /// Whether the upstream model provider has credentials.
    #[serde(default)]
    pub openrouter_configured: bool,
    /// Whether the retrieval document was found.
    #[serde(default)]
    pub qa_document_loaded: bool,
    /// Model identifier used for replies.
    #[serde(default)]
    pub model: Option<String>,
}

impl HealthStatus {
    /// Returns true if the service reports itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Error body of a non-2xx reply.
///
/// `detail` is usually a string but validation failures carry a list.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Parses an error body and extracts a human-readable detail.
    pub(crate) fn detail_from(bytes: &[u8]) -> Option<String> {
        let body: Self = serde_json::from_slice(bytes).ok()?;
        match body.detail? {
            serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
            serde_json::Value::String(_) | serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_null_conversation() {
        let request = SendMessageRequest::new("hi", None, Language::Korean);
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({"message": "hi", "conversation_id": null, "language": "ko"})
        );
    }

    #[test]
    fn response_tolerates_missing_optional_fields() {
        let parsed: SendMessageResponse =
            serde_json::from_value(json!({"response": "hello"})).expect("deserialize");
        assert!(parsed.issued_conversation_id().is_none());
        assert_eq!(parsed.response, "hello");
    }

    #[test]
    fn blank_conversation_id_is_not_issued() {
        let parsed: SendMessageResponse =
            serde_json::from_value(json!({"response": "x", "conversation_id": ""}))
                .expect("deserialize");
        assert!(parsed.issued_conversation_id().is_none());
    }

    #[test]
    fn history_parses_naive_timestamps() {
        let parsed: HistoryResponse = serde_json::from_value(json!({
            "id": "c1",
            "title": "TIER 1",
            "messages": [
                {"id": "m1", "role": "user", "content": "q", "created_at": "2026-01-29T10:00:00.123456"},
                {"role": "assistant", "content": "a"}
            ]
        }))
        .expect("deserialize");
        assert_eq!(parsed.messages.len(), 2);
        assert!(parsed.messages[0].created_at.is_some());
        assert_eq!(parsed.messages[1].role, MessageRole::Assistant);
    }

    #[test]
    fn error_detail_string() {
        let detail = ErrorBody::detail_from(br#"{"detail": "Conversation not found"}"#);
        assert_eq!(detail.as_deref(), Some("Conversation not found"));
    }

    #[test]
    fn error_detail_structured() {
        let detail = ErrorBody::detail_from(br#"{"detail": [{"msg": "field required"}]}"#)
            .expect("detail present");
        assert!(detail.contains("field required"));
    }

    #[test]
    fn error_detail_unparseable() {
        assert!(ErrorBody::detail_from(b"<html>Bad Gateway</html>").is_none());
        assert!(ErrorBody::detail_from(br#"{"error": "x"}"#).is_none());
    }

    #[test]
    fn health_status_check() {
        let health: HealthStatus =
            serde_json::from_value(json!({"status": "healthy", "model": "m"}))
                .expect("deserialize");
        assert!(health.is_healthy());
        assert!(!health.openrouter_configured);
    }
}
