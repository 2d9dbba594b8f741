use std::collections::HashMap;

use num_bigint::BigUint;
use num_traits::Zero;

use tally_keyvalue::{join, KeyValueStore, KvError, KEY_SEPARATOR};
use tally_types::{Account, Address, Currency};

use crate::error::{StorageError, StorageResult};

/// Persistence boundary for balance records.
///
/// A balance record exists implicitly once any non-zero save occurs; an
/// absent record reads as zero, never as an error.
pub trait BalanceRepository: Send + Sync {
    /// Read the balance for the triple; zero when no record exists.
    fn load(&self, addr: &Address, acc: Account, curr: &Currency) -> StorageResult<BigUint>;

    /// Persist the balance for the triple.
    fn save(
        &self,
        addr: &Address,
        acc: Account,
        curr: &Currency,
        value: &BigUint,
    ) -> StorageResult<()>;

    /// All balances held by `(acc, addr)`, keyed by currency.
    fn list(&self, addr: &Address, acc: Account) -> StorageResult<HashMap<Currency, BigUint>>;
}

/// Balance repository over any [`KeyValueStore`] backend.
///
/// Key layout: `<account-hex>/<address>/<currency>`. The account kind leads
/// so all currencies of one `(account, address)` pair are prefix-scannable
/// without leaking other account kinds. Values are big-endian unsigned
/// bytes; zero persists as the empty byte string.
pub struct BalanceStore<S> {
    db: S,
}

impl<S: KeyValueStore> BalanceStore<S> {
    pub fn new(db: S) -> Self {
        Self { db }
    }

    /// Key for one balance record, e.g. `"2b/alice/USD"`.
    fn key(acc: Account, addr: &Address, curr: &Currency) -> String {
        join([acc.key_hex().as_str(), addr.as_str(), curr.as_str()])
    }

    /// Scan prefix for all currencies of `(acc, addr)`, e.g. `"2b/alice"`.
    fn prefix(acc: Account, addr: &Address) -> String {
        join([acc.key_hex().as_str(), addr.as_str()])
    }
}

impl<S: KeyValueStore> BalanceRepository for BalanceStore<S> {
    fn load(&self, addr: &Address, acc: Account, curr: &Currency) -> StorageResult<BigUint> {
        match self.db.get(&Self::key(acc, addr, curr)) {
            Ok(raw) => Ok(BigUint::from_bytes_be(&raw)),
            Err(KvError::NotFound) => Ok(BigUint::zero()),
            Err(err) => Err(StorageError::BalanceDatabase(err.to_string())),
        }
    }

    fn save(
        &self,
        addr: &Address,
        acc: Account,
        curr: &Currency,
        value: &BigUint,
    ) -> StorageResult<()> {
        // Zero serializes to the empty byte string, mirroring the read
        // side where empty bytes decode to zero.
        let raw = if value.is_zero() {
            Vec::new()
        } else {
            value.to_bytes_be()
        };
        self.db
            .set(&Self::key(acc, addr, curr), &raw)
            .map_err(|err| StorageError::BalanceDatabase(err.to_string()))
    }

    fn list(&self, addr: &Address, acc: Account) -> StorageResult<HashMap<Currency, BigUint>> {
        let mut iter = self
            .db
            .iter(&Self::prefix(acc, addr))
            .map_err(|err| StorageError::BalanceDatabase(err.to_string()))?;

        let mut out = HashMap::new();
        while iter.has_next() {
            let (key, value) = iter
                .next_entry()
                .map_err(|err| StorageError::BalanceDatabase(err.to_string()))?;

            let segments: Vec<&str> = key.split(KEY_SEPARATOR).collect();
            if segments.len() != 3 {
                return Err(StorageError::CorruptBalanceKey(key));
            }

            out.insert(Currency::from(segments[2]), BigUint::from_bytes_be(&value));
        }

        Ok(out)
    }
}
