use chrono::Utc;
use common::{ActionType, AutopilotModule};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde_json::json;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::entity::{price_history, price_sync_queue, product};
use crate::queue::{NewPriceChange, QueueError, WorkQueue, price_sync_queue};

use super::action_log::{NewActionLog, record_action_best_effort};
use super::purchasing::owned_product;
use super::{AutopilotError, Tenant};

/// Outcome counts of one price-sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceSyncSummary {
    pub processed: u64,
    pub failed: u64,
}

/// Why a single queue entry could not be applied.
#[derive(Debug, thiserror::Error)]
pub enum PriceSyncError {
    #[error("product {0} not found")]
    ProductNotFound(i32),

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Validate and enqueue a price change for one of the tenant's products.
pub async fn enqueue_price_change(
    db: &DatabaseConnection,
    tenant: &Tenant,
    change: NewPriceChange,
) -> Result<price_sync_queue::Model, AutopilotError> {
    if change.old_price.is_sign_negative() {
        return Err(AutopilotError::Validation(
            "old_price must not be negative".into(),
        ));
    }
    if change.new_price.is_sign_negative() {
        return Err(AutopilotError::Validation(
            "new_price must not be negative".into(),
        ));
    }

    owned_product(db, tenant, change.product_id).await?;

    let entry = price_sync_queue(db).enqueue(tenant, change).await?;
    info!(tenant = %tenant, entry_id = %entry.id, product_id = entry.product_id, "Enqueued price change");
    Ok(entry)
}

/// Claim up to `batch_size` pending entries of `tenant` and apply each one.
///
/// Entries are independent: a failing entry is marked failed and the batch
/// goes on. Only a failure to claim aborts the run.
pub async fn process_price_sync_queue(
    db: &DatabaseConnection,
    tenant: &Tenant,
    batch_size: u64,
) -> Result<PriceSyncSummary, AutopilotError> {
    let queue = price_sync_queue(db);
    process_batch(&queue, db, tenant, batch_size).await
}

/// [`process_price_sync_queue`] over any queue implementation.
pub async fn process_batch<Q>(
    queue: &Q,
    db: &DatabaseConnection,
    tenant: &Tenant,
    batch_size: u64,
) -> Result<PriceSyncSummary, AutopilotError>
where
    Q: WorkQueue<Item = price_sync_queue::Model> + ?Sized,
{
    let entries = queue.claim_next_batch(tenant, batch_size).await?;
    let mut summary = PriceSyncSummary::default();

    if entries.is_empty() {
        debug!(tenant = %tenant, "No pending price changes");
        return Ok(summary);
    }

    for entry in &entries {
        match apply_price_change(queue, db, tenant, entry).await {
            Ok(()) => {
                summary.processed += 1;
                record_action_best_effort(db, tenant, success_log(entry)).await;
            }
            Err(PriceSyncError::Queue(QueueError::ClaimLost { id })) => {
                // Another run owns the entry now; the product write was rolled back.
                warn!(tenant = %tenant, entry_id = %id, "Claim lost before entry could be completed");
                summary.failed += 1;
            }
            Err(e) => {
                let message = e.to_string();
                warn!(
                    tenant = %tenant,
                    entry_id = %entry.id,
                    product_id = entry.product_id,
                    error = %message,
                    "Price sync entry failed"
                );
                match queue.mark_failed(entry, &message).await {
                    Ok(()) => {}
                    Err(QueueError::ClaimLost { id }) => {
                        warn!(entry_id = %id, "Claim lost before entry could be marked failed");
                    }
                    Err(e) => return Err(e.into()),
                }
                summary.failed += 1;
                record_action_best_effort(db, tenant, failure_log(entry, &message)).await;
            }
        }
    }

    info!(
        tenant = %tenant,
        processed = summary.processed,
        failed = summary.failed,
        "Processed price sync batch"
    );
    Ok(summary)
}

/// Write the new price onto the product, append the history row and mark
/// the entry done, all in one transaction.
async fn apply_price_change<Q>(
    queue: &Q,
    db: &DatabaseConnection,
    tenant: &Tenant,
    entry: &price_sync_queue::Model,
) -> Result<(), PriceSyncError>
where
    Q: WorkQueue<Item = price_sync_queue::Model> + ?Sized,
{
    let txn = db.begin().await?;

    match write_price_change(queue, &txn, tenant, entry).await {
        Ok(()) => {
            txn.commit().await?;
            Ok(())
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                error!(entry_id = %entry.id, error = %rollback, "Failed to roll back price change");
            }
            Err(e)
        }
    }
}

async fn write_price_change<Q>(
    queue: &Q,
    txn: &DatabaseTransaction,
    tenant: &Tenant,
    entry: &price_sync_queue::Model,
) -> Result<(), PriceSyncError>
where
    Q: WorkQueue<Item = price_sync_queue::Model> + ?Sized,
{
    let now = Utc::now();

    let updated = product::Entity::update_many()
        .col_expr(product::Column::Price, Expr::value(entry.new_price))
        .col_expr(product::Column::LastPriceUpdate, Expr::value(now))
        .filter(product::Column::Id.eq(entry.product_id))
        .filter(product::Column::UserId.eq(tenant.as_str()))
        .exec(txn)
        .await?;

    if updated.rows_affected == 0 {
        return Err(PriceSyncError::ProductNotFound(entry.product_id));
    }

    price_history::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(tenant.as_str().to_owned()),
        product_id: Set(entry.product_id),
        old_price: Set(entry.old_price),
        new_price: Set(entry.new_price),
        changed_by: Set("autopilot".into()),
        reason: Set(format!("price sync to {}", entry.target_system)),
        changed_at: Set(now),
    }
    .insert(txn)
    .await?;

    queue.mark_done(txn, entry).await?;
    Ok(())
}

fn success_description(product_id: i32, old_price: Decimal, new_price: Decimal) -> String {
    format!(
        "Price synced for product {}: ${} → ${}",
        product_id,
        old_price.normalize(),
        new_price.normalize()
    )
}

fn success_log(entry: &price_sync_queue::Model) -> NewActionLog {
    NewActionLog::success(
        ActionType::PriceSync,
        AutopilotModule::Pricing,
        success_description(entry.product_id, entry.old_price, entry.new_price),
    )
    .with_metadata(json!({
        "product_id": entry.product_id,
        "target_system": entry.target_system,
    }))
}

fn failure_log(entry: &price_sync_queue::Model, message: &str) -> NewActionLog {
    NewActionLog::failed(
        ActionType::PriceSync,
        AutopilotModule::Pricing,
        format!(
            "Price sync failed for product {}: {}",
            entry.product_id, message
        ),
    )
    .with_metadata(json!({
        "product_id": entry.product_id,
        "target_system": entry.target_system,
        "entry_id": entry.id,
    }))
}
