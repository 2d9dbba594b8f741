use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::account::{Account, Address, Currency};
use crate::envelope::Validate;
use crate::error::ValidationError;

/// Audit record of one balance mutation.
///
/// Every mutating ledger operation emits one `BalanceUpdate` per touched
/// balance. The record is transient per-call output; persisting it is the
/// job of downstream audit collaborators, not of the ledger itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceUpdate {
    pub address: Address,
    pub account: Account,
    pub currency: Currency,
    pub old_value: BigUint,
    pub new_value: BigUint,
    pub value_delta: BigUint,
}

impl Validate for BalanceUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.address.is_empty() {
            return Err(ValidationError::EmptyField("address"));
        }
        if self.currency.is_empty() {
            return Err(ValidationError::EmptyField("currency"));
        }
        // The delta must account for the move in either direction.
        let grew = &self.old_value + &self.value_delta == self.new_value;
        let shrank = &self.new_value + &self.value_delta == self.old_value;
        if !grew && !shrank {
            return Err(ValidationError::DeltaMismatch);
        }
        Ok(())
    }
}

/// Ordered set of balance updates produced by one ledger operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancesUpdate(pub Vec<BalanceUpdate>);

impl BalancesUpdate {
    pub fn iter(&self) -> std::slice::Iter<'_, BalanceUpdate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<BalanceUpdate>> for BalancesUpdate {
    fn from(updates: Vec<BalanceUpdate>) -> Self {
        Self(updates)
    }
}

impl From<BalanceUpdate> for BalancesUpdate {
    fn from(update: BalanceUpdate) -> Self {
        Self(vec![update])
    }
}

impl From<[BalanceUpdate; 2]> for BalancesUpdate {
    fn from(pair: [BalanceUpdate; 2]) -> Self {
        Self(pair.into())
    }
}

impl Validate for BalancesUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        for update in &self.0 {
            update.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(old: u32, new: u32, delta: u32) -> BalanceUpdate {
        BalanceUpdate {
            address: Address::from("alice"),
            account: Account::Token,
            currency: Currency::from("USD"),
            old_value: BigUint::from(old),
            new_value: BigUint::from(new),
            value_delta: BigUint::from(delta),
        }
    }

    #[test]
    fn valid_deposit_and_withdrawal_deltas() {
        assert!(update(0, 100, 100).validate().is_ok());
        assert!(update(100, 40, 60).validate().is_ok());
    }

    #[test]
    fn mismatched_delta_is_rejected() {
        assert_eq!(
            update(0, 100, 50).validate(),
            Err(ValidationError::DeltaMismatch)
        );
    }

    #[test]
    fn empty_address_is_rejected() {
        let mut u = update(0, 1, 1);
        u.address = Address::from("");
        assert_eq!(u.validate(), Err(ValidationError::EmptyField("address")));
    }

    #[test]
    fn collection_validates_element_wise() {
        let good = BalancesUpdate::from(vec![update(0, 10, 10), update(10, 0, 10)]);
        assert!(good.validate().is_ok());
        assert_eq!(good.len(), 2);

        let bad = BalancesUpdate::from(vec![update(0, 10, 10), update(0, 10, 9)]);
        assert_eq!(bad.validate(), Err(ValidationError::DeltaMismatch));
    }
}
