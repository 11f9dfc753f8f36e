//! Error types for the terminal front-end.

use std::fmt;

/// Errors that end a `krx-chat` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Configuration could not be loaded.
    Config { reason: String },
    /// The HTTP client could not be created.
    Startup,
    /// A one-shot request failed.
    Request { operation: &'static str },
    /// The line editor failed.
    Terminal { reason: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { reason } => write!(f, "invalid configuration: {reason}"),
            Self::Startup => write!(f, "failed to start the chat client"),
            Self::Request { operation } => write!(f, "{operation} request failed"),
            Self::Terminal { reason } => write!(f, "terminal error: {reason}"),
        }
    }
}

impl std::error::Error for CliError {}
