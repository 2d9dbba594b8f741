use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The balance database failed; carries the cause text.
    #[error("balance database error: {0}")]
    BalanceDatabase(String),

    /// A balance scan yielded a key that does not split into the expected
    /// account/address/currency layout. Surfaced, never skipped.
    #[error("corrupt balance key '{0}'")]
    CorruptBalanceKey(String),

    /// The requested object does not exist.
    #[error("object not found")]
    ObjectNotFound,

    /// The object database failed; carries the cause text.
    #[error("object database error: {0}")]
    ObjectDatabase(String),

    /// An object failed its own consistency checks.
    #[error("object validation failed: {0}")]
    ObjectValidation(String),

    /// An object could not be encoded for storage.
    #[error("object encoding error: {0}")]
    ObjectEncoding(String),

    /// Stored bytes could not be decoded back into the object.
    #[error("object decoding error: {0}")]
    ObjectDecoding(String),

    /// The notification database failed; carries the cause text.
    #[error("notification database error: {0}")]
    NotificationDatabase(String),
}

/// Result alias for repository operations.
pub type StorageResult<T> = Result<T, StorageError>;
