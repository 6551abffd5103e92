//! Error types for session discovery

use std::path::PathBuf;

/// Domain failures that abort a list or resume operation
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store not found at {}", .0.display())]
    StoreNotFound(PathBuf),

    #[error("not inside a git repository")]
    NotInRepository,

    #[error("no sessions match the current repository")]
    NoMatchingSessions,
}

/// Why a single session log could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Read(#[from] rewind_store::JsonlError),

    #[error("record {record} is not a JSON object")]
    NotAnObject { record: usize },
}
