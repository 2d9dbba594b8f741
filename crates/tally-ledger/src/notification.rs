use tracing::debug;

use tally_storage::NotificationRepository;
use tally_types::{BalancesUpdate, Notification, Validate};

use crate::error::{LedgerError, LedgerResult};

/// Audit notification service over any [`NotificationRepository`].
///
/// Services that need strict reporting hand their balance movements to
/// this bookkeeping boundary; records are validated before they are
/// persisted, so the audit store only ever holds well-formed entries.
pub struct NotificationService<R> {
    repo: R,
}

impl<R: NotificationRepository> NotificationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and persist one balances-update notification.
    pub fn notify_balances_update(
        &self,
        record: &Notification<BalancesUpdate>,
    ) -> LedgerResult<()> {
        record
            .validate()
            .map_err(|err| LedgerError::NotificationValidation(err.to_string()))?;

        self.repo
            .save_balances_update(record)
            .map_err(|err| LedgerError::NotificationDatabase(err.to_string()))?;

        debug!(id = %record.id, kind = %record.kind, updates = record.body.len(),
            "balances update recorded");

        Ok(())
    }
}
