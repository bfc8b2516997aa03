//! Kalike Error Types
//!
//! Centralized error handling for the tutoring core.

use thiserror::Error;

/// Central error type for Kalike
#[derive(Error, Debug)]
pub enum KalikeError {
    #[error("Speech recognition error: {0}")]
    Stt(String),

    #[error("Speech synthesis error: {0}")]
    Tts(String),

    #[error("Audio playback error: {0}")]
    Audio(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tutor service error: {0}")]
    Tutor(String),

    #[error("Lesson could not be generated: {0}")]
    Lesson(String),

    #[error("Capability unavailable: {0}")]
    Unsupported(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Kalike operations
pub type KalikeResult<T> = Result<T, KalikeError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for KalikeError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        KalikeError::Lock(err.to_string())
    }
}
