use chrono::{DateTime, Utc};
use common::{SyncStatus, TargetSystem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::autopilot::PriceSyncSummary;
use crate::entity::price_sync_queue;
use crate::queue::NewPriceChange;

/// Query parameters for listing queue entries.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQueueParams {
    /// Filter by sync status.
    #[param(example = "pending")]
    pub status: Option<String>,
    /// Maximum entries returned (1-200, default 50).
    #[param(example = 50)]
    pub limit: Option<u64>,
}

/// Request body for enqueuing a price change.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EnqueuePriceChangeRequest {
    #[schema(example = 42)]
    pub product_id: i32,
    #[schema(value_type = String, example = "10.00")]
    pub old_price: Decimal,
    #[schema(value_type = String, example = "8.50")]
    pub new_price: Decimal,
    pub target_system: TargetSystem,
}

impl From<EnqueuePriceChangeRequest> for NewPriceChange {
    fn from(r: EnqueuePriceChangeRequest) -> Self {
        Self {
            product_id: r.product_id,
            old_price: r.old_price,
            new_price: r.new_price,
            target_system: r.target_system,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PriceSyncEntryResponse {
    pub id: Uuid,
    #[schema(example = 42)]
    pub product_id: i32,
    #[schema(value_type = String, example = "10.00")]
    pub old_price: Decimal,
    #[schema(value_type = String, example = "8.50")]
    pub new_price: Decimal,
    pub target_system: TargetSystem,
    pub sync_status: SyncStatus,
    #[schema(example = 0)]
    pub sync_attempts: i32,
    /// Present when the entry failed.
    pub error_message: Option<String>,
    #[schema(example = "2024-01-10T08:00:00Z")]
    pub created_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
}

impl From<price_sync_queue::Model> for PriceSyncEntryResponse {
    fn from(m: price_sync_queue::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            old_price: m.old_price,
            new_price: m.new_price,
            target_system: m.target_system,
            sync_status: m.sync_status,
            sync_attempts: m.sync_attempts,
            error_message: m.error_message,
            created_at: m.created_at,
            synced_at: m.synced_at,
        }
    }
}

/// Result of a price-sync run.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PriceSyncRunResponse {
    /// Entries applied and marked completed.
    #[schema(example = 9)]
    pub processed: u64,
    /// Entries marked failed.
    #[schema(example = 1)]
    pub failed: u64,
}

impl From<PriceSyncSummary> for PriceSyncRunResponse {
    fn from(s: PriceSyncSummary) -> Self {
        Self {
            processed: s.processed,
            failed: s.failed,
        }
    }
}
