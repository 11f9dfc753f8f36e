//! Conversation session manager for the KRX chat assistant.
//!
//! This crate provides:
//!
//! - **Messages**: role-tagged transcript entries and their rendered form
//! - **Session state**: visibility, loading and restore flags, the active
//!   conversation id and the transcript
//! - **Conversation store**: persistence of the active conversation id
//! - **Chat view**: the passive sink the session pushes render instructions to
//! - **Chat session**: the handle exposing send, new conversation, history
//!   reload and visibility operations

pub mod error;
pub mod locale;
pub mod manager;
pub mod message;
pub mod state;
pub mod store;
pub mod view;

pub use error::StoreError;
pub use locale::LocaleText;
pub use manager::{BootPolicy, ChatSession, HistoryOutcome, SendOutcome};
pub use message::{Message, RenderedMessage};
pub use state::{SessionPhase, SessionState, SkipReason};
pub use store::{ConversationStore, FileStore, MemoryStore};
pub use view::{ChatView, NullView};
