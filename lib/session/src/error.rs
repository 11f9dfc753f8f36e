//! Error types for the session crate.
//!
//! Store errors never reach callers of the session. They are raised inside
//! [`FileStore`](crate::store::FileStore), logged, and swallowed.

use std::fmt;
use std::path::PathBuf;

/// Errors from conversation id persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The stored id could not be read.
    ReadFailed { path: PathBuf, reason: String },
    /// The id could not be written.
    WriteFailed { path: PathBuf, reason: String },
    /// The stored id could not be removed.
    ClearFailed { path: PathBuf, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { path, reason } => {
                write!(f, "failed to read {}: {reason}", path.display())
            }
            Self::WriteFailed { path, reason } => {
                write!(f, "failed to write {}: {reason}", path.display())
            }
            Self::ClearFailed { path, reason } => {
                write!(f, "failed to remove {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_path() {
        let err = StoreError::WriteFailed {
            path: PathBuf::from("/tmp/krx/id"),
            reason: "read-only file system".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write /tmp/krx/id: read-only file system"
        );
    }
}
