//! A [`ChatView`] that writes to the terminal.

use colored::Colorize;
use krx_chat_client::ConversationSummary;
use krx_chat_core::MessageRole;
use krx_chat_render::{Segment, unescape_html};
use krx_chat_session::{ChatView, LocaleText, RenderedMessage};
use std::io::Write;

/// Terminal rendering of a chat session.
#[derive(Debug, Clone, Copy)]
pub struct TerminalView {
    echo_user: bool,
    show_restored: bool,
}

impl TerminalView {
    /// A view for interactive mode, where the line editor already shows
    /// what the user typed.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            echo_user: false,
            show_restored: true,
        }
    }

    /// A view for one question: echoes it, hides restored history.
    #[must_use]
    pub fn single_question() -> Self {
        Self {
            echo_user: true,
            show_restored: false,
        }
    }
}

impl ChatView for TerminalView {
    fn refresh_texts(&self, text: &LocaleText) {
        println!("{} · {}", text.title.bold(), text.subtitle.dimmed());
    }

    fn show_loading(&self, text: &LocaleText) {
        print!("{}", text.thinking.dimmed());
        let _ = std::io::stdout().flush();
    }

    fn remove_loading(&self) {
        print!("\r\x1b[2K");
        let _ = std::io::stdout().flush();
    }

    fn append(&self, message: &RenderedMessage) {
        if message.role == MessageRole::User && !self.echo_user {
            return;
        }
        println!("{}\n", format_message(message));
    }

    fn replace_all(&self, messages: &[RenderedMessage]) {
        if !self.show_restored {
            return;
        }
        println!("{}", "─".repeat(40).dimmed());
        for message in messages {
            println!("{}\n", format_message(message));
        }
    }
}

/// Formats one message as a labelled block.
#[must_use]
pub fn format_message(message: &RenderedMessage) -> String {
    let label = match message.role {
        MessageRole::User => "You".blue().bold(),
        MessageRole::Assistant => "Assistant".green().bold(),
        MessageRole::System => "•".yellow(),
    };
    format!("{label}\n{}", format_body(message))
}

/// Formats a rendered body, underlining links and showing their target when
/// it differs from the displayed text.
#[must_use]
pub fn format_body(message: &RenderedMessage) -> String {
    let mut out = String::new();
    for segment in message.body.segments() {
        match segment {
            Segment::Text(text) => {
                let text = unescape_html(text);
                if message.role == MessageRole::System {
                    out.push_str(&text.dimmed().to_string());
                } else {
                    out.push_str(&text);
                }
            }
            Segment::Link(link) => {
                let text = unescape_html(&link.text);
                let href = unescape_html(&link.href);
                out.push_str(&text.cyan().underline().to_string());
                if href != text {
                    out.push_str(&format!(" [{href}]").dimmed().to_string());
                }
            }
        }
    }
    out
}

/// Formats one row of the conversation list.
#[must_use]
pub fn format_summary(summary: &ConversationSummary) -> String {
    format!(
        "{}  {:>3} msgs  {}  {}",
        summary.id.short().bold(),
        summary.message_count,
        summary.updated_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        summary.title.as_deref().unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use krx_chat_session::Message;

    fn plain<T>(f: impl FnOnce() -> T) -> T {
        colored::control::set_override(false);
        f()
    }

    #[test]
    fn links_show_target_when_it_differs() {
        let rendered =
            Message::assistant("open http://localhost:8000/signals.html or /breakout.html").render();
        let body = plain(|| format_body(&rendered));
        assert_eq!(
            body,
            "open http://localhost:8000/signals.html [/signals.html] or /breakout.html"
        );
    }

    #[test]
    fn escaped_text_is_shown_raw() {
        let rendered = Message::assistant("a < b & c").render();
        assert_eq!(plain(|| format_body(&rendered)), "a < b & c");
    }

    #[test]
    fn message_block_has_label() {
        let rendered = Message::user("hi").render();
        assert_eq!(plain(|| format_message(&rendered)), "You\nhi");
    }
}
