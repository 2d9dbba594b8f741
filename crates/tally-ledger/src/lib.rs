//! Balance ledger services for Tally.
//!
//! This crate is the business layer of Tally. It provides:
//! - [`BalanceService`] — deposits, withdrawals, and two-account transfers
//!   over any [`tally_storage::BalanceRepository`], each emitting
//!   [`tally_types::BalanceUpdate`] audit records
//! - [`NotificationService`] — validated persistence of balances-update
//!   audit notifications
//!
//! Every operation is a strict read-check-write sequence with no retained
//! state. Business-rule violations (`InvalidAmount`, `InsufficientFunds`)
//! are distinct sentinels for identity-based branching; repository failures
//! wrap into [`LedgerError::Repository`] carrying the cause text.
//!
//! Two consistency gaps are inherited from the storage contract and left to
//! the caller or hosting platform: the load-then-save sequence is not
//! atomic across concurrent calls, and a transfer whose second write fails
//! leaves the first write in place. See DESIGN.md for the rationale.

pub mod balance;
pub mod error;
pub mod notification;

pub use balance::BalanceService;
pub use error::{LedgerError, LedgerResult};
pub use notification::NotificationService;
