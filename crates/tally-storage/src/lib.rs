//! Repositories over the Tally key-value contract.
//!
//! This crate turns the raw [`tally_keyvalue::KeyValueStore`] byte interface
//! into typed persistence:
//!
//! - [`BalanceStore`] — maps `(account, address, currency)` triples to
//!   arbitrary-precision non-negative balances
//! - [`ObjectRepository`] — generic load/save/delete/scan for any record
//!   that serializes with serde and validates itself
//! - [`NotificationStore`] — audit records persisted through the object
//!   repository under `kind/id` keys
//!
//! Each repository wraps backend failures into its own error sentinel,
//! carrying the original cause as text so backend types never cross this
//! boundary.

pub mod balance;
pub mod error;
pub mod notification;
pub mod object;

pub use balance::{BalanceRepository, BalanceStore};
pub use error::{StorageError, StorageResult};
pub use notification::{NotificationRepository, NotificationStore};
pub use object::ObjectRepository;
