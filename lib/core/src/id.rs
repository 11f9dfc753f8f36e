//! Strongly-typed identifiers.
//!
//! Conversation ids are opaque strings issued by the assistant service.
//! Request ids are client-side ULIDs used to correlate log events for a
//! single outbound exchange.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Identifier of a server-tracked conversation.
///
/// The value is never interpreted on the client; it is echoed back to the
/// server on every send and written to the persisted store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Creates a conversation ID from a server-issued string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the server sent an empty or whitespace-only id.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns a short prefix suitable for status lines.
    #[must_use]
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ConversationId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError {
                id_type: "ConversationId",
                reason: "empty value".to_string(),
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ParseIdError {
                id_type: "ConversationId",
                reason: "contains whitespace".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<String> for ConversationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for one outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Ulid);

impl RequestId {
    /// Creates a new ID with a randomly generated ULID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req_{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ulid_str = s.strip_prefix("req_").unwrap_or(s);
        Ulid::from_str(ulid_str)
            .map(Self)
            .map_err(|e| ParseIdError {
                id_type: "RequestId",
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_id_parse_trims() {
        let id: ConversationId = "  3f2a-77\n".parse().expect("should parse");
        assert_eq!(id.as_str(), "3f2a-77");
    }

    #[test]
    fn conversation_id_rejects_blank() {
        let result: Result<ConversationId, _> = "   ".parse();
        let err = result.unwrap_err();
        assert_eq!(err.id_type, "ConversationId");
    }

    #[test]
    fn conversation_id_rejects_inner_whitespace() {
        let result: Result<ConversationId, _> = "abc def".parse();
        assert!(result.is_err());
    }

    #[test]
    fn conversation_id_short_prefix() {
        let id = ConversationId::new("0b9c2d1e-aaaa-bbbb");
        assert_eq!(id.short(), "0b9c2d1e");

        let tiny = ConversationId::new("abc");
        assert_eq!(tiny.short(), "abc");
    }

    #[test]
    fn conversation_id_is_transparent_in_json() {
        let id = ConversationId::new("c-1");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"c-1\"");
    }

    #[test]
    fn blank_server_id_is_detected() {
        assert!(ConversationId::new("").is_blank());
        assert!(!ConversationId::new("x").is_blank());
    }

    #[test]
    fn request_id_display_format() {
        let id = RequestId::new();
        assert!(id.to_string().starts_with("req_"));
    }

    #[test]
    fn request_id_parse_with_and_without_prefix() {
        let id = RequestId::new();
        let parsed: RequestId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);

        let raw: RequestId = id.as_ulid().to_string().parse().expect("should parse");
        assert_eq!(id, raw);
    }
}
