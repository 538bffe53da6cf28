use common::RecommendationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Suggested production quantity for one product on one day.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "production_recommendation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub user_id: String,

    #[sea_orm(indexed)]
    pub product_id: i32,

    /// Production day the recommendation is for.
    #[sea_orm(indexed)]
    pub date: Date,

    pub recommended_quantity: i32,

    pub current_planned_quantity: i32,

    /// Between 0 and 1.
    #[sea_orm(column_type = "Decimal(Some((5, 4)))")]
    pub confidence_score: Decimal,

    /// Inputs behind the recommendation, e.g. {"weather": "rain", "weekday": "sat"}.
    #[sea_orm(column_type = "JsonBinary")]
    pub factors: serde_json::Value,

    pub status: RecommendationStatus,

    pub created_at: DateTimeUtc,

    pub applied_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
