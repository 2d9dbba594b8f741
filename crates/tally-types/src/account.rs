use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a ledger participant.
///
/// The ledger never interprets the contents; any non-empty string the host
/// platform hands out (a wallet address, a user id) is a valid `Address`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Balance-bucket classification associated with an [`Address`].
///
/// An account kind is not a user identity: the same address holds one bucket
/// per kind per currency. The discriminants are part of the persisted key
/// layout (one hex pair per kind) and must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Account {
    /// Spendable token balance.
    Token = 43,
    /// Spendable allowance granted by another address.
    Allowed = 44,
    /// Token balance locked by a hold.
    TokenLocked = 46,
    /// Allowance locked by a hold.
    AllowedLocked = 47,
}

impl Account {
    /// The single byte persisted in storage keys.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Hex pair used as the leading key segment, e.g. `"2b"` for `Token`.
    pub fn key_hex(self) -> String {
        hex::encode([self.as_byte()])
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Account::Token => "Token",
            Account::Allowed => "Allowed",
            Account::TokenLocked => "TokenLocked",
            Account::AllowedLocked => "AllowedLocked",
        };
        f.write_str(name)
    }
}

/// Opaque denomination identifier, e.g. `"USD"` or a token ticker.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    pub fn new(curr: impl Into<String>) -> Self {
        Self(curr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
