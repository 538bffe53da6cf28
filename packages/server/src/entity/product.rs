use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item owned by a tenant.
///
/// Products are managed by the wider application; the autopilot reads stock
/// and expiration dates and writes prices.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub user_id: String,

    pub name: String,

    /// Units currently in stock.
    pub quantity: i32,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,

    pub last_price_update: Option<DateTimeUtc>,

    #[sea_orm(indexed)]
    pub expiration_date: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
