//! The chat session handle.
//!
//! A [`ChatSession`] owns the session state and orchestrates the backend, the
//! conversation store and the view. Clones share one session. The state lock
//! is only held between suspension points, never across a request.

use crate::locale::LocaleText;
use crate::message::{Message, RenderedMessage};
use crate::state::{SessionPhase, SessionState, SkipReason};
use crate::store::ConversationStore;
use crate::view::ChatView;
use krx_chat_client::{ChatBackend, RequestError, SendMessageResponse};
use krx_chat_core::{ConversationId, Language};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Result of [`ChatSession::send_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent.
    Skipped(SkipReason),
    /// The assistant reply was appended.
    Replied,
    /// A failure notice was appended.
    Failed(RequestError),
    /// The conversation was reset while the request was in flight; the
    /// reply was dropped.
    Superseded,
}

/// Result of [`ChatSession::load_history`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// The transcript was replaced with the stored messages.
    Restored { messages: usize },
    /// The server no longer knows the conversation; the id was forgotten.
    NotFound,
    /// The fetch failed; the id was forgotten.
    Failed(RequestError),
    /// A send or another restore was in flight.
    Skipped,
    /// The conversation was reset while the fetch was in flight.
    Superseded,
}

/// What to do with a persisted conversation id at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootPolicy {
    /// Discard any stored id and start a new conversation.
    #[default]
    Fresh,
    /// Restore the stored conversation before accepting input.
    Resume,
}

struct Shared {
    backend: Arc<dyn ChatBackend>,
    store: Arc<dyn ConversationStore>,
    view: Arc<dyn ChatView>,
    state: Mutex<SessionState>,
}

/// Handle to one chat session.
#[derive(Clone)]
pub struct ChatSession {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("state", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl ChatSession {
    /// Creates a closed session showing the welcome message.
    #[must_use]
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        store: Arc<dyn ConversationStore>,
        view: Arc<dyn ChatView>,
        language: Language,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend,
                store,
                view,
                state: Mutex::new(SessionState::new(language)),
            }),
        }
    }

    /// Applies the startup policy for a persisted conversation id.
    ///
    /// With [`BootPolicy::Resume`] the restore runs to completion before this
    /// returns. Returns `None` when nothing was restored.
    pub async fn boot(&self, policy: BootPolicy) -> Option<HistoryOutcome> {
        match policy {
            BootPolicy::Fresh => {
                if let Some(stale) = self.shared.store.read() {
                    debug!(conversation_id = %stale, "discarding stored conversation id");
                    self.shared.store.clear();
                }
                None
            }
            BootPolicy::Resume => {
                let id = self.shared.store.read()?;
                Some(self.load_history(&id).await)
            }
        }
    }

    /// Shows the panel.
    pub fn open(&self) {
        self.set_open(true);
    }

    /// Hides the panel. A send in flight keeps running.
    pub fn close(&self) {
        self.set_open(false);
    }

    /// Flips panel visibility and returns the new value.
    pub fn toggle(&self) -> bool {
        let (open, text) = {
            let mut state = self.lock();
            let open = !state.is_open();
            state.set_open(open);
            (open, state.text())
        };
        self.render_open(open, text);
        open
    }

    /// Switches the language used for labels and later sends.
    pub fn set_language(&self, language: Language) {
        let text = {
            let mut state = self.lock();
            state.set_language(language);
            state.text()
        };
        self.shared.view.refresh_texts(text);
    }

    /// Sends one user turn.
    ///
    /// Blank text, a send already in flight and a restore in flight all make
    /// this a no-op. Otherwise the user message is appended before the request
    /// is issued and exactly one reply or failure notice follows it.
    #[instrument(skip_all)]
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let begun = self.lock().begin_send(text);
        let ticket = match begun {
            Ok(ticket) => ticket,
            Err(reason) => {
                debug!(?reason, "send skipped");
                return SendOutcome::Skipped(reason);
            }
        };

        let view = &self.shared.view;
        view.set_send_enabled(false);
        view.append(&ticket.user_message.render());
        view.show_loading(LocaleText::for_language(ticket.request.language));
        let mut pending = PendingSend::new(self);

        debug!(
            conversation_id = ?ticket.request.conversation_id,
            language = %ticket.request.language,
            "sending message"
        );
        let result = self.shared.backend.send_message(&ticket.request).await;

        pending.clear_placeholder();
        self.complete_send(ticket.epoch, result)
    }

    fn complete_send(
        &self,
        epoch: u64,
        result: Result<SendMessageResponse, RequestError>,
    ) -> SendOutcome {
        let mut state = self.lock();
        if state.epoch() != epoch {
            info!("conversation was reset while waiting, reply dropped");
            return SendOutcome::Superseded;
        }

        match result {
            Ok(reply) => {
                let issued = reply.issued_conversation_id().cloned();
                if let Some(id) = &issued {
                    if state.conversation_id() != Some(id) {
                        info!(conversation_id = %id, "conversation started");
                    }
                    state.adopt_conversation(id.clone());
                }
                let message = Message::assistant(reply.response);
                state.push(message.clone());
                drop(state);

                if let Some(id) = &issued {
                    self.shared.store.write(id);
                }
                self.shared.view.append(&message.render());
                SendOutcome::Replied
            }
            Err(error) => {
                warn!(error = %error, "send failed");
                let notice = failure_notice(state.text(), &error);
                state.push(notice.clone());
                drop(state);

                self.shared.view.append(&notice.render());
                SendOutcome::Failed(error)
            }
        }
    }

    /// Replaces the transcript with a stored conversation.
    ///
    /// Any failure forgets the id, clears the store and leaves the transcript
    /// as it was.
    #[instrument(skip_all, fields(conversation_id = %id))]
    pub async fn load_history(&self, id: &ConversationId) -> HistoryOutcome {
        let begun = self.lock().begin_restore();
        let Some(epoch) = begun else {
            debug!("history reload skipped");
            return HistoryOutcome::Skipped;
        };
        let _restoring = PendingRestore(self);

        let result = self.shared.backend.fetch_history(id).await;

        let mut state = self.lock();
        if state.epoch() != epoch {
            info!("conversation was reset while restoring, history dropped");
            return HistoryOutcome::Superseded;
        }

        match result {
            Ok(history) => {
                let messages: Vec<Message> =
                    history.messages.into_iter().map(Message::from).collect();
                let count = messages.len();
                state.restore(id.clone(), messages);
                let rendered: Vec<RenderedMessage> =
                    state.messages().iter().map(Message::render).collect();
                drop(state);

                self.shared.store.write(id);
                self.shared.view.replace_all(&rendered);
                info!(messages = count, "conversation restored");
                HistoryOutcome::Restored { messages: count }
            }
            Err(error) => {
                state.forget_conversation();
                drop(state);

                self.shared.store.clear();
                if error.is_not_found() {
                    info!("stored conversation no longer exists");
                    HistoryOutcome::NotFound
                } else {
                    warn!(error = %error, "history reload failed");
                    HistoryOutcome::Failed(error)
                }
            }
        }
    }

    /// Starts a new conversation without contacting the server.
    pub fn new_conversation(&self) {
        let (previous, rendered) = {
            let mut state = self.lock();
            let previous = state.conversation_id().cloned();
            state.reset();
            let rendered: Vec<RenderedMessage> =
                state.messages().iter().map(Message::render).collect();
            (previous, rendered)
        };

        self.shared.store.clear();
        self.shared.view.replace_all(&rendered);
        self.shared.view.focus_input();
        info!(previous = ?previous, "new conversation");
    }

    /// Returns a copy of the transcript.
    #[must_use]
    pub fn transcript(&self) -> Vec<Message> {
        self.lock().messages().to_vec()
    }

    /// Returns the transcript rendered for display.
    #[must_use]
    pub fn rendered_transcript(&self) -> Vec<RenderedMessage> {
        self.lock().messages().iter().map(Message::render).collect()
    }

    #[must_use]
    pub fn conversation_id(&self) -> Option<ConversationId> {
        self.lock().conversation_id().cloned()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().is_open()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.lock().language()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.lock().phase()
    }

    /// Returns the strings for the current language.
    #[must_use]
    pub fn text(&self) -> &'static LocaleText {
        self.lock().text()
    }

    fn set_open(&self, open: bool) {
        let text = {
            let mut state = self.lock();
            state.set_open(open);
            state.text()
        };
        self.render_open(open, text);
    }

    fn render_open(&self, open: bool, text: &LocaleText) {
        let view = &self.shared.view;
        view.set_open(open);
        if open {
            view.refresh_texts(text);
            view.focus_input();
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles a send when dropped, including when the caller abandons it.
struct PendingSend<'a> {
    session: &'a ChatSession,
    placeholder_shown: bool,
}

impl<'a> PendingSend<'a> {
    fn new(session: &'a ChatSession) -> Self {
        Self {
            session,
            placeholder_shown: true,
        }
    }

    fn clear_placeholder(&mut self) {
        if std::mem::take(&mut self.placeholder_shown) {
            self.session.shared.view.remove_loading();
        }
    }
}

impl Drop for PendingSend<'_> {
    fn drop(&mut self) {
        self.clear_placeholder();
        self.session.lock().finish_send();
        let view = &self.session.shared.view;
        view.set_send_enabled(true);
        view.focus_input();
    }
}

/// Clears the restore gate when dropped.
struct PendingRestore<'a>(&'a ChatSession);

impl Drop for PendingRestore<'_> {
    fn drop(&mut self) {
        self.0.lock().finish_restore();
    }
}

/// Builds the system message shown for a failed send.
fn failure_notice(text: &LocaleText, error: &RequestError) -> Message {
    let detail = match error {
        RequestError::Timeout { limit } => {
            Some(format!("{} ({}s)", text.timeout, limit.as_secs()))
        }
        RequestError::Network { .. } => {
            Some(format!("{}\n{}", text.connection_error, text.network_hint))
        }
        RequestError::Server { detail, .. } => detail.clone(),
        RequestError::NotFound { .. } | RequestError::InvalidResponse { .. } => {
            Some(error.to_string())
        }
        RequestError::InvalidConfig { .. } => Some(text.connection_error.to_string()),
    };
    match detail {
        Some(detail) => Message::system(format!("{}\n{detail}", text.error)),
        None => Message::system(text.error),
    }
}
