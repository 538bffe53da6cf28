use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{SyncStatus, TargetSystem};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::autopilot::Tenant;
use crate::entity::price_sync_queue;

use super::{QueueError, WorkQueue};

/// A price change to enqueue.
#[derive(Debug, Clone)]
pub struct NewPriceChange {
    pub product_id: i32,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub target_system: TargetSystem,
}

/// Database-backed price-sync queue.
///
/// Claims are taken with a conditional `pending -> syncing` update per row, so
/// a row that another run claimed first is simply skipped.
pub struct SeaOrmPriceSyncQueue<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SeaOrmPriceSyncQueue<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Insert a new pending entry.
    pub async fn enqueue(
        &self,
        tenant: &Tenant,
        change: NewPriceChange,
    ) -> Result<price_sync_queue::Model, DbErr> {
        let entry = price_sync_queue::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(tenant.as_str().to_owned()),
            product_id: Set(change.product_id),
            old_price: Set(change.old_price),
            new_price: Set(change.new_price),
            target_system: Set(change.target_system),
            sync_status: Set(SyncStatus::Pending),
            sync_attempts: Set(0),
            error_message: Set(None),
            created_at: Set(Utc::now()),
            claimed_at: Set(None),
            synced_at: Set(None),
        };
        entry.insert(self.conn).await
    }

    /// List entries of `tenant`, newest first.
    pub async fn list(
        &self,
        tenant: &Tenant,
        status: Option<SyncStatus>,
        limit: u64,
    ) -> Result<Vec<price_sync_queue::Model>, DbErr> {
        let mut query = price_sync_queue::Entity::find()
            .filter(price_sync_queue::Column::UserId.eq(tenant.as_str()));

        if let Some(status) = status {
            query = query.filter(price_sync_queue::Column::SyncStatus.eq(status));
        }

        query
            .order_by_desc(price_sync_queue::Column::CreatedAt)
            .limit(limit)
            .all(self.conn)
            .await
    }

    /// Return entries claimed before `claimed_before` to `pending`.
    ///
    /// Covers runs that crashed between claiming and marking. Returns the
    /// number of released entries.
    pub async fn release_stale_claims(&self, claimed_before: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = price_sync_queue::Entity::update_many()
            .col_expr(
                price_sync_queue::Column::SyncStatus,
                Expr::value(SyncStatus::Pending),
            )
            .col_expr(
                price_sync_queue::Column::ClaimedAt,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .filter(price_sync_queue::Column::SyncStatus.eq(SyncStatus::Syncing))
            .filter(price_sync_queue::Column::ClaimedAt.lt(claimed_before))
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Conditionally move one entry from `pending` to `syncing`.
    async fn try_claim(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = price_sync_queue::Entity::update_many()
            .col_expr(
                price_sync_queue::Column::SyncStatus,
                Expr::value(SyncStatus::Syncing),
            )
            .col_expr(price_sync_queue::Column::ClaimedAt, Expr::value(now))
            .filter(price_sync_queue::Column::Id.eq(id))
            .filter(price_sync_queue::Column::SyncStatus.eq(SyncStatus::Pending))
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

/// Shorthand for a queue store over `conn`.
pub fn price_sync_queue<C: ConnectionTrait>(conn: &C) -> SeaOrmPriceSyncQueue<'_, C> {
    SeaOrmPriceSyncQueue::new(conn)
}

#[async_trait]
impl<'a, C> WorkQueue for SeaOrmPriceSyncQueue<'a, C>
where
    C: ConnectionTrait + Send + Sync,
{
    type Item = price_sync_queue::Model;

    async fn claim_next_batch(
        &self,
        tenant: &Tenant,
        limit: u64,
    ) -> Result<Vec<Self::Item>, QueueError> {
        let candidate_ids: Vec<Uuid> = price_sync_queue::Entity::find()
            .select_only()
            .column(price_sync_queue::Column::Id)
            .filter(price_sync_queue::Column::UserId.eq(tenant.as_str()))
            .filter(price_sync_queue::Column::SyncStatus.eq(SyncStatus::Pending))
            .order_by_desc(price_sync_queue::Column::CreatedAt)
            .limit(limit)
            .into_tuple()
            .all(self.conn)
            .await?;

        if candidate_ids.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut claimed = Vec::with_capacity(candidate_ids.len());
        for id in candidate_ids {
            if self.try_claim(id, now).await? {
                claimed.push(id);
            } else {
                debug!(%id, "Queue entry already claimed by another run");
            }
        }

        if claimed.is_empty() {
            return Ok(Vec::new());
        }

        let items = price_sync_queue::Entity::find()
            .filter(price_sync_queue::Column::Id.is_in(claimed))
            .order_by_desc(price_sync_queue::Column::CreatedAt)
            .all(self.conn)
            .await?;

        Ok(items)
    }

    async fn mark_done(
        &self,
        txn: &DatabaseTransaction,
        item: &Self::Item,
    ) -> Result<(), QueueError> {
        let result = price_sync_queue::Entity::update_many()
            .col_expr(
                price_sync_queue::Column::SyncStatus,
                Expr::value(SyncStatus::Completed),
            )
            .col_expr(price_sync_queue::Column::SyncedAt, Expr::value(Utc::now()))
            .col_expr(
                price_sync_queue::Column::ErrorMessage,
                Expr::value(Option::<String>::None),
            )
            .filter(price_sync_queue::Column::Id.eq(item.id))
            .filter(price_sync_queue::Column::SyncStatus.eq(SyncStatus::Syncing))
            .exec(txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(QueueError::ClaimLost { id: item.id });
        }
        Ok(())
    }

    async fn mark_failed(&self, item: &Self::Item, error: &str) -> Result<(), QueueError> {
        let result = price_sync_queue::Entity::update_many()
            .col_expr(
                price_sync_queue::Column::SyncStatus,
                Expr::value(SyncStatus::Failed),
            )
            .col_expr(
                price_sync_queue::Column::SyncAttempts,
                Expr::value(item.sync_attempts + 1),
            )
            .col_expr(
                price_sync_queue::Column::ErrorMessage,
                Expr::value(Some(error.to_owned())),
            )
            .filter(price_sync_queue::Column::Id.eq(item.id))
            .filter(price_sync_queue::Column::SyncStatus.eq(SyncStatus::Syncing))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(QueueError::ClaimLost { id: item.id });
        }
        Ok(())
    }
}
