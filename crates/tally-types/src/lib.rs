//! Domain model for the Tally balance ledger.
//!
//! This crate provides the core accounting types used throughout the Tally
//! system. Every other Tally crate depends on `tally-types`.
//!
//! # Key Types
//!
//! - [`Address`] — Opaque participant identifier
//! - [`Account`] — Balance-bucket classification (not a user identity)
//! - [`Currency`] — Opaque denomination identifier
//! - [`BalanceUpdate`] — Audit record of one mutation's before/after/delta
//! - [`BalancesUpdate`] — Ordered collection of updates, validated as a unit
//! - [`Notification`] — Generic envelope delivering typed records downstream
//! - [`Validate`] — Capability trait for self-checking records

pub mod account;
pub mod envelope;
pub mod error;
pub mod update;

pub use account::{Account, Address, Currency};
pub use envelope::{Notification, Validate};
pub use error::ValidationError;
pub use update::{BalanceUpdate, BalancesUpdate};
