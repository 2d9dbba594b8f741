use num_bigint::BigUint;
use num_traits::{CheckedSub, Zero};
use tracing::debug;

use tally_storage::BalanceRepository;
use tally_types::{Account, Address, BalanceUpdate, Currency};

use crate::error::{LedgerError, LedgerResult};

/// Balance ledger service over any [`BalanceRepository`].
///
/// Each operation is a strict read-check-write sequence: validate the
/// amount, load the current balance(s), compute the result, check the
/// non-negativity invariant, then write. No write is ever performed once a
/// check has failed, so a rejected operation leaves the ledger untouched.
pub struct BalanceService<R> {
    repo: R,
}

impl<R: BalanceRepository> BalanceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Increase the balance of `(addr, acc, curr)` by `amt`.
    pub fn deposit(
        &self,
        addr: &Address,
        acc: Account,
        curr: &Currency,
        amt: &BigUint,
    ) -> LedgerResult<BalanceUpdate> {
        if amt.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let before = self.load(addr, acc, curr)?;
        let after = &before + amt;
        self.save(addr, acc, curr, &after)?;

        debug!(%addr, %acc, %curr, %amt, "deposit applied");

        Ok(BalanceUpdate {
            address: addr.clone(),
            account: acc,
            currency: curr.clone(),
            old_value: before,
            new_value: after,
            value_delta: amt.clone(),
        })
    }

    /// Decrease the balance of `(addr, acc, curr)` by `amt`.
    ///
    /// Fails with [`LedgerError::InsufficientFunds`] and performs no write
    /// when the balance cannot cover the amount.
    pub fn withdraw(
        &self,
        addr: &Address,
        acc: Account,
        curr: &Currency,
        amt: &BigUint,
    ) -> LedgerResult<BalanceUpdate> {
        if amt.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let before = self.load(addr, acc, curr)?;
        let after = before
            .checked_sub(amt)
            .ok_or(LedgerError::InsufficientFunds)?;
        self.save(addr, acc, curr, &after)?;

        debug!(%addr, %acc, %curr, %amt, "withdrawal applied");

        Ok(BalanceUpdate {
            address: addr.clone(),
            account: acc,
            currency: curr.clone(),
            old_value: before,
            new_value: after,
            value_delta: amt.clone(),
        })
    }

    /// Move `amt` between two addresses within one account kind.
    ///
    /// Returns the ordered `[from, to]` update pair.
    pub fn transfer(
        &self,
        addr_from: &Address,
        addr_to: &Address,
        acc: Account,
        curr: &Currency,
        amt: &BigUint,
    ) -> LedgerResult<[BalanceUpdate; 2]> {
        self.transfer_between(addr_from, addr_to, acc, acc, curr, amt)
    }

    /// Move `amt` between two account kinds of one address.
    ///
    /// Returns the ordered `[from, to]` update pair.
    pub fn internal_transfer(
        &self,
        addr: &Address,
        acc_from: Account,
        acc_to: Account,
        curr: &Currency,
        amt: &BigUint,
    ) -> LedgerResult<[BalanceUpdate; 2]> {
        self.transfer_between(addr, addr, acc_from, acc_to, curr, amt)
    }

    /// Read the balance of `(addr, acc, curr)`; zero when never written.
    pub fn fetch(&self, addr: &Address, acc: Account, curr: &Currency) -> LedgerResult<BigUint> {
        self.load(addr, acc, curr)
    }

    fn transfer_between(
        &self,
        addr_from: &Address,
        addr_to: &Address,
        acc_from: Account,
        acc_to: Account,
        curr: &Currency,
        amt: &BigUint,
    ) -> LedgerResult<[BalanceUpdate; 2]> {
        if amt.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        // Fixed load order: source first, then destination.
        let before_from = self.load(addr_from, acc_from, curr)?;
        let before_to = self.load(addr_to, acc_to, curr)?;

        let after_from = before_from
            .checked_sub(amt)
            .ok_or(LedgerError::InsufficientFunds)?;
        let after_to = &before_to + amt;

        // Writes follow the load order. A failure of the second write
        // leaves the first in place; see the crate docs.
        self.save(addr_from, acc_from, curr, &after_from)?;
        self.save(addr_to, acc_to, curr, &after_to)?;

        debug!(
            from = %addr_from, to = %addr_to,
            acc_from = %acc_from, acc_to = %acc_to,
            %curr, %amt,
            "transfer applied"
        );

        Ok([
            BalanceUpdate {
                address: addr_from.clone(),
                account: acc_from,
                currency: curr.clone(),
                old_value: before_from,
                new_value: after_from,
                value_delta: amt.clone(),
            },
            BalanceUpdate {
                address: addr_to.clone(),
                account: acc_to,
                currency: curr.clone(),
                old_value: before_to,
                new_value: after_to,
                value_delta: amt.clone(),
            },
        ])
    }

    fn load(&self, addr: &Address, acc: Account, curr: &Currency) -> LedgerResult<BigUint> {
        self.repo
            .load(addr, acc, curr)
            .map_err(|err| LedgerError::Repository(err.to_string()))
    }

    fn save(
        &self,
        addr: &Address,
        acc: Account,
        curr: &Currency,
        value: &BigUint,
    ) -> LedgerResult<()> {
        self.repo
            .save(addr, acc, curr, value)
            .map_err(|err| LedgerError::Repository(err.to_string()))
    }
}
