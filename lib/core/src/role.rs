//! Message roles shared by the wire protocol and the transcript.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Text typed by the local user.
    User,
    /// Reply produced by the assistant service.
    Assistant,
    /// Locally generated notice (welcome text, failure reports).
    System,
}

impl MessageRole {
    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serde_is_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).expect("serialize");
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str("\"system\"").expect("deserialize");
        assert_eq!(parsed, MessageRole::System);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed: Result<MessageRole, _> = serde_json::from_str("\"tool\"");
        assert!(parsed.is_err());
    }
}
