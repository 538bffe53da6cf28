use common::{OrderOrigin, PromotionStatus, PromotionType, TargetAudience};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promotion")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub user_id: String,

    /// NULL for promotions that are not tied to a single product.
    #[sea_orm(indexed)]
    pub product_id: Option<i32>,

    pub promotion_type: PromotionType,

    pub discount_percentage: i32,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    pub target_audience: TargetAudience,

    /// Channel names stored as JSON array, e.g. ["email", "push"].
    #[sea_orm(column_type = "JsonBinary")]
    pub channels: serde_json::Value,

    pub start_time: DateTimeUtc,

    pub end_time: DateTimeUtc,

    #[sea_orm(indexed)]
    pub status: PromotionStatus,

    pub sent_count: i32,

    pub conversion_count: i32,

    pub created_by: OrderOrigin,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
