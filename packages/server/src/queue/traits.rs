use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use crate::autopilot::Tenant;

use super::QueueError;

/// A tenant-scoped queue with exclusive claims.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    type Item: Send + Sync;

    /// Claim up to `limit` pending items of `tenant`, newest first.
    ///
    /// Two concurrent callers never receive the same item.
    async fn claim_next_batch(
        &self,
        tenant: &Tenant,
        limit: u64,
    ) -> Result<Vec<Self::Item>, QueueError>;

    /// Mark a claimed item as successfully processed.
    ///
    /// Runs inside `txn` so the completion commits or rolls back together
    /// with the work it records.
    async fn mark_done(
        &self,
        txn: &DatabaseTransaction,
        item: &Self::Item,
    ) -> Result<(), QueueError>;

    /// Mark a claimed item as failed and record why.
    async fn mark_failed(&self, item: &Self::Item, error: &str) -> Result<(), QueueError>;
}
