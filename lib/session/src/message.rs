//! Transcript messages.
//!
//! Messages keep the text exactly as it was typed or received. Escaping and
//! link recognition happen when a message is rendered.

use krx_chat_client::HistoryMessage;
use krx_chat_core::MessageRole;
use krx_chat_render::{Rendered, linkify, render_plain};

/// A message in the session transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who sent the message.
    pub role: MessageRole,
    /// Raw message text.
    pub content: String,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Renders the message for display.
    ///
    /// Only assistant text is linkified. User and system text is escaped.
    #[must_use]
    pub fn render(&self) -> RenderedMessage {
        let body = match self.role {
            MessageRole::Assistant => linkify(&self.content),
            MessageRole::User | MessageRole::System => render_plain(&self.content),
        };
        RenderedMessage {
            role: self.role,
            body,
        }
    }
}

impl From<HistoryMessage> for Message {
    fn from(message: HistoryMessage) -> Self {
        Self::new(message.role, message.content)
    }
}

/// A message ready for a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Who sent the message.
    pub role: MessageRole,
    /// Escaped, link-annotated body.
    pub body: Rendered,
}

impl RenderedMessage {
    /// Returns the message as a `chat-message` block.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"chat-message {}\">{}</div>",
            self.role,
            self.body.to_html()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_messages_are_linkified() {
        let rendered = Message::assistant("see /signals.html").render();
        assert_eq!(rendered.body.links().count(), 1);
    }

    #[test]
    fn user_and_system_messages_are_only_escaped() {
        for message in [
            Message::user("<b>/signals.html</b>"),
            Message::system("<b>/signals.html</b>"),
        ] {
            let rendered = message.render();
            assert_eq!(rendered.body.links().count(), 0);
            assert_eq!(
                rendered.body.to_html(),
                "&lt;b&gt;/signals.html&lt;/b&gt;"
            );
        }
    }

    #[test]
    fn content_is_stored_raw() {
        let message = Message::assistant("a & b <c>");
        assert_eq!(message.content, "a & b <c>");
    }

    #[test]
    fn html_block_carries_role_class() {
        let html = Message::user("hi").render().to_html();
        assert_eq!(html, "<div class=\"chat-message user\">hi</div>");
    }

    #[test]
    fn history_message_conversion_keeps_role() {
        let history = HistoryMessage {
            id: Some("m1".to_string()),
            role: MessageRole::Assistant,
            content: "answer".to_string(),
            created_at: None,
        };
        assert_eq!(Message::from(history), Message::assistant("answer"));
    }
}
