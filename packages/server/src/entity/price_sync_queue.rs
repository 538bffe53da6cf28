use common::{SyncStatus, TargetSystem};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A requested price change waiting to be written to a product.
///
/// Rows are never deleted; the table doubles as the audit trail of price syncs.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_sync_queue")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub user_id: String,

    #[sea_orm(indexed)]
    pub product_id: i32,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub old_price: Decimal,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub new_price: Decimal,

    pub target_system: TargetSystem,

    #[sea_orm(indexed)]
    pub sync_status: SyncStatus,

    /// Incremented each time the entry is marked failed.
    pub sync_attempts: i32,

    /// Set iff `sync_status` is `Failed`.
    #[sea_orm(column_type = "Text")]
    pub error_message: Option<String>,

    pub created_at: DateTimeUtc,

    /// When the current claim was taken. Used to release claims of crashed runs.
    pub claimed_at: Option<DateTimeUtc>,

    /// Set iff `sync_status` is `Completed`.
    pub synced_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
