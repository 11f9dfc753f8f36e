//! The passive view a session renders into.

use crate::locale::LocaleText;
use crate::message::RenderedMessage;

/// Sink for render instructions.
///
/// Every method defaults to doing nothing so a view only implements what it
/// can show. Implementations must not call back into the session.
pub trait ChatView: Send + Sync {
    /// Shows or hides the panel.
    fn set_open(&self, _open: bool) {}

    /// Redraws locale-dependent labels.
    fn refresh_texts(&self, _text: &LocaleText) {}

    /// Moves focus to the input.
    fn focus_input(&self) {}

    /// Enables or disables the send affordance.
    fn set_send_enabled(&self, _enabled: bool) {}

    /// Shows the transient loading placeholder.
    fn show_loading(&self, _text: &LocaleText) {}

    /// Removes the loading placeholder if shown.
    fn remove_loading(&self) {}

    /// Appends one message.
    fn append(&self, _message: &RenderedMessage) {}

    /// Replaces the whole transcript.
    fn replace_all(&self, _messages: &[RenderedMessage]) {}
}

/// A view that renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl ChatView for NullView {}
