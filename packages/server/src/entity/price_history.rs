use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_history")]
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

    /// "autopilot" or the id of the person who changed the price.
    pub changed_by: String,

    pub reason: String,

    pub changed_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
