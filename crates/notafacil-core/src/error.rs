//! Error types for notafacil.

use thiserror::Error;

/// Result type alias using notafacil's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A broken domain rule.
///
/// Each variant renders a stable, human-readable message that callers may
/// surface verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Note title cannot be empty")]
    EmptyTitle,

    #[error("Note title cannot exceed {max} characters")]
    TitleTooLong { max: usize },

    #[error("Note content cannot exceed {max} characters")]
    ContentTooLong { max: usize },

    #[error("Tag name cannot be empty")]
    EmptyTagName,

    #[error("Tag name cannot exceed {max} characters")]
    TagNameTooLong { max: usize },

    #[error("Tag color must be a valid hex code (#RGB or #RRGGBB)")]
    InvalidColor,
}

/// Core error type for notafacil operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A domain rule was violated
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Import payload could not be decoded at all
    #[error("Invalid JSON: {0}")]
    MalformedJson(String),

    /// Import payload decoded but has the wrong top-level structure
    #[error("Invalid data format: {0}")]
    UnexpectedShape(String),

    /// A single import record failed; earlier records stay applied
    #[error("Invalid note data: {source}")]
    InvalidNoteData {
        /// Zero-based position of the failing record in the payload.
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the error (or the cause of a wrapped import failure) comes
    /// from the storage layer rather than from the caller's data.
    pub fn is_infrastructure(&self) -> bool {
        match self {
            Error::Database(_) | Error::Io(_) | Error::Internal(_) | Error::Config(_) => true,
            Error::InvalidNoteData { source, .. } => source.is_infrastructure(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
