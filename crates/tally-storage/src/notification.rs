use tally_keyvalue::{join, KeyValueStore};
use tally_types::{BalancesUpdate, Notification};

use crate::error::{StorageError, StorageResult};
use crate::object::ObjectRepository;

/// Persistence boundary for audit notifications.
pub trait NotificationRepository: Send + Sync {
    /// Persist one balances-update notification.
    fn save_balances_update(&self, record: &Notification<BalancesUpdate>) -> StorageResult<()>;
}

/// Notification repository over any [`KeyValueStore`] backend.
///
/// Records are stored through the generic [`ObjectRepository`] under
/// `kind/id` keys, so all notifications of one kind share a scan prefix.
pub struct NotificationStore<S> {
    objects: ObjectRepository<S>,
}

impl<S: KeyValueStore> NotificationStore<S> {
    pub fn new(db: S) -> Self {
        Self {
            objects: ObjectRepository::new(db),
        }
    }
}

impl<S: KeyValueStore> NotificationRepository for NotificationStore<S> {
    fn save_balances_update(&self, record: &Notification<BalancesUpdate>) -> StorageResult<()> {
        let query = join([record.kind.as_str(), record.id.as_str()]);
        self.objects
            .save(&query, record)
            .map_err(|err| StorageError::NotificationDatabase(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use tally_keyvalue::InMemoryStore;
    use tally_types::{Account, Address, BalanceUpdate, Currency};

    use super::*;

    fn update() -> BalanceUpdate {
        BalanceUpdate {
            address: Address::from("alice"),
            account: Account::Token,
            currency: Currency::from("USD"),
            old_value: BigUint::from(0u32),
            new_value: BigUint::from(100u32),
            value_delta: BigUint::from(100u32),
        }
    }

    #[test]
    fn notification_persists_under_kind_id_key() {
        use std::sync::Arc;

        let db = Arc::new(InMemoryStore::new());
        let store = NotificationStore::new(Arc::clone(&db));
        let record = Notification::new("rec-1", "balances", BalancesUpdate::from(update()));

        store.save_balances_update(&record).unwrap();

        let raw = db.get("balances/rec-1").unwrap();
        let back: Notification<BalancesUpdate> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn invalid_notification_is_rejected() {
        let store = NotificationStore::new(InMemoryStore::new());
        let record = Notification::new("", "balances", BalancesUpdate::from(update()));

        let err = store.save_balances_update(&record).unwrap_err();
        assert!(matches!(err, StorageError::NotificationDatabase(_)));
        assert!(err.to_string().contains("required field 'id' is empty"));
    }
}
