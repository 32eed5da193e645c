//! Error types for building and registering header sessions.
//!
//! Interaction events never fail: stale gestures and empty undo stacks are
//! silent no-ops. These errors only cover malformed session input.

use thiserror::Error;

use crate::ids::{FileId, HeaderSource};

/// Errors raised while constructing or registering a [`FileSession`](crate::FileSession).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// File identifier is empty or whitespace.
    #[error("invalid file id: {0:?}")]
    InvalidFileId(String),

    /// A header name in one of the lists is empty.
    #[error("empty header name in the {0} list")]
    EmptyHeader(HeaderSource),

    /// The same header name appears twice across the lists.
    #[error("header '{0}' appears more than once")]
    DuplicateHeader(String),

    /// A session for this file already exists.
    #[error("a session is already registered for file {0}")]
    AlreadyRegistered(FileId),
}

/// Result type alias for session construction.
pub type Result<T> = std::result::Result<T, SessionError>;
