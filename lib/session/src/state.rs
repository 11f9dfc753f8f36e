//! Session state and its transitions.
//!
//! All mutation goes through methods that enforce the loading and restore
//! gates; the manager only decides when to call them.

use crate::locale::LocaleText;
use crate::message::Message;
use krx_chat_client::SendMessageRequest;
use krx_chat_core::{ConversationId, Language};

/// The visible phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Panel hidden. A send may still be in flight.
    Closed,
    /// Panel shown, ready for input.
    OpenIdle,
    /// Panel shown, waiting for a reply.
    OpenLoading,
}

impl SessionPhase {
    /// Returns true if the panel is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Why a send was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The text was empty or whitespace.
    Empty,
    /// Another send is in flight.
    Busy,
    /// A history restore is in flight.
    Restoring,
}

/// A send that passed the gates and must be completed.
#[derive(Debug)]
pub(crate) struct SendTicket {
    pub(crate) epoch: u64,
    pub(crate) user_message: Message,
    pub(crate) request: SendMessageRequest,
}

/// Mutable state of one chat session.
#[derive(Debug, Clone)]
pub struct SessionState {
    is_open: bool,
    is_loading: bool,
    restoring: bool,
    conversation_id: Option<ConversationId>,
    language: Language,
    messages: Vec<Message>,
    epoch: u64,
}

impl SessionState {
    /// Creates a closed, idle session whose transcript holds the welcome message.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            is_open: false,
            is_loading: false,
            restoring: false,
            conversation_id: None,
            language,
            messages: vec![welcome(language)],
            epoch: 0,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (self.is_open, self.is_loading) {
            (false, _) => SessionPhase::Closed,
            (true, false) => SessionPhase::OpenIdle,
            (true, true) => SessionPhase::OpenLoading,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    #[must_use]
    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns the strings for the current language.
    #[must_use]
    pub fn text(&self) -> &'static LocaleText {
        LocaleText::for_language(self.language)
    }

    /// Returns the transcript in display order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    pub(crate) fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Appends the user message and marks the session loading.
    pub(crate) fn begin_send(&mut self, text: &str) -> Result<SendTicket, SkipReason> {
        let message = text.trim();
        if message.is_empty() {
            return Err(SkipReason::Empty);
        }
        if self.is_loading {
            return Err(SkipReason::Busy);
        }
        if self.restoring {
            return Err(SkipReason::Restoring);
        }

        let user_message = Message::user(message);
        self.messages.push(user_message.clone());
        self.is_loading = true;

        Ok(SendTicket {
            epoch: self.epoch,
            user_message,
            request: SendMessageRequest::new(
                message,
                self.conversation_id.clone(),
                self.language,
            ),
        })
    }

    pub(crate) fn finish_send(&mut self) {
        self.is_loading = false;
    }

    /// Marks a restore as started; returns the epoch it belongs to.
    pub(crate) fn begin_restore(&mut self) -> Option<u64> {
        if self.is_loading || self.restoring {
            return None;
        }
        self.restoring = true;
        Some(self.epoch)
    }

    pub(crate) fn finish_restore(&mut self) {
        self.restoring = false;
    }

    /// Adopts a conversation id issued by the server.
    pub(crate) fn adopt_conversation(&mut self, id: ConversationId) {
        self.conversation_id = Some(id);
    }

    /// Forgets the active conversation id without touching the transcript.
    pub(crate) fn forget_conversation(&mut self) {
        self.conversation_id = None;
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replaces the transcript with the welcome message followed by `history`.
    pub(crate) fn restore(&mut self, id: ConversationId, history: Vec<Message>) {
        self.conversation_id = Some(id);
        self.messages = std::iter::once(welcome(self.language))
            .chain(history)
            .collect();
    }

    /// Starts a new conversation: no id, transcript reseeded with the welcome
    /// message. Replies still in flight belong to the old epoch.
    pub(crate) fn reset(&mut self) {
        self.conversation_id = None;
        self.messages = vec![welcome(self.language)];
        self.epoch += 1;
    }
}

fn welcome(language: Language) -> Message {
    Message::system(LocaleText::for_language(language).welcome)
}
