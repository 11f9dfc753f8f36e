//! Error types for the chat client.
//!
//! Every failure of an outbound exchange is classified into exactly one
//! `RequestError` variant so callers can choose a user-facing message
//! without inspecting transport details.

use std::fmt;
use std::time::Duration;

/// Errors from a single request to the assistant service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The exchange did not settle within the time limit and was cancelled.
    Timeout { limit: Duration },
    /// The request never produced an HTTP response (DNS, refused, offline).
    Network { reason: String },
    /// The server answered with a non-2xx status.
    Server { status: u16, detail: Option<String> },
    /// The requested conversation does not exist.
    NotFound { resource: String },
    /// A 2xx body did not match the expected shape.
    InvalidResponse { reason: String },
    /// The client could not be constructed from its configuration.
    InvalidConfig { reason: String },
}

impl RequestError {
    /// Returns true if the request was cancelled by the time limit.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { limit } => {
                write!(f, "request timed out after {}s", limit.as_secs())
            }
            Self::Network { reason } => write!(f, "network error: {reason}"),
            Self::Server { status, detail } => match detail {
                Some(detail) => write!(f, "server returned {status}: {detail}"),
                None => write!(f, "server returned {status}"),
            },
            Self::NotFound { resource } => write!(f, "resource not found: {resource}"),
            Self::InvalidResponse { reason } => {
                write!(f, "invalid response body: {reason}")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid client configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for RequestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display_includes_limit() {
        let err = RequestError::Timeout {
            limit: Duration::from_secs(60),
        };
        assert!(err.to_string().contains("60s"));
        assert!(err.is_timeout());
    }

    #[test]
    fn server_error_display_with_and_without_detail() {
        let with = RequestError::Server {
            status: 500,
            detail: Some("OPENROUTER_API_KEY not configured".to_string()),
        };
        assert!(with.to_string().contains("OPENROUTER_API_KEY"));

        let without = RequestError::Server {
            status: 502,
            detail: None,
        };
        assert_eq!(without.to_string(), "server returned 502");
    }

    #[test]
    fn not_found_is_distinguished() {
        let err = RequestError::NotFound {
            resource: "/api/chat/history/abc".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_timeout());
    }
}
