use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-product stock threshold that drafts a purchase order when breached.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reorder_rule")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub user_id: String,

    #[sea_orm(indexed)]
    pub product_id: i32,

    pub supplier_id: Option<String>,

    /// Reorder when stock is at or below this level.
    pub min_stock_level: i32,

    pub reorder_quantity: i32,

    pub lead_time_days: i32,

    #[sea_orm(default_value = true, indexed)]
    pub is_active: bool,

    pub last_order_date: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
