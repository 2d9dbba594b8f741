use thiserror::Error;

/// Errors from ledger service operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The balance repository failed; carries the cause text.
    #[error("balance repository error: {0}")]
    Repository(String),

    /// A mutation was requested with a zero amount. Rejected before any
    /// read or write.
    #[error("amount must be greater than 0")]
    InvalidAmount,

    /// The source balance cannot cover the requested amount. Rejected
    /// after computation, before any write.
    #[error("insufficient funds to process")]
    InsufficientFunds,

    /// An audit notification failed its consistency checks.
    #[error("invalid notification: {0}")]
    NotificationValidation(String),

    /// The notification repository failed; carries the cause text.
    #[error("notification database error: {0}")]
    NotificationDatabase(String),
}

/// Result alias for ledger service operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
