use thiserror::Error;

/// Errors from key-value store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KvError {
    /// The requested key does not exist.
    #[error("key not found")]
    NotFound,

    /// The host-backed store has no underlying state handle.
    #[error("host state handle is unset")]
    HandleUnset,

    /// A backend failure, carrying only the cause text so host specifics
    /// never cross this boundary.
    #[error("internal storage error: {0}")]
    Internal(String),
}

/// Result alias for key-value store operations.
pub type KvResult<T> = Result<T, KvError>;
