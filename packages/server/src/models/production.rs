use chrono::{DateTime, NaiveDate, Utc};
use common::RecommendationStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::autopilot::production::NewProductionRecommendation;
use crate::entity::production_recommendation;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductionRecommendationsParams {
    /// Maximum recommendations returned (1-200, default 50).
    #[param(example = 30)]
    pub limit: Option<u64>,
}

/// Request body for recording a production recommendation.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateProductionRecommendationRequest {
    #[schema(example = 42)]
    pub product_id: i32,
    /// Production day.
    #[schema(example = "2024-01-10")]
    pub date: NaiveDate,
    #[schema(example = 40)]
    pub recommended_quantity: i32,
    /// Defaults to 0.
    #[schema(example = 30)]
    pub current_planned_quantity: Option<i32>,
    /// Between 0 and 1.
    #[schema(value_type = String, example = "0.85")]
    pub confidence_score: Decimal,
    /// Free-form inputs behind the recommendation. Defaults to `{}`.
    pub factors: Option<serde_json::Value>,
    /// Defaults to `pending`.
    pub status: Option<RecommendationStatus>,
}

impl From<CreateProductionRecommendationRequest> for NewProductionRecommendation {
    fn from(r: CreateProductionRecommendationRequest) -> Self {
        Self {
            product_id: r.product_id,
            date: r.date,
            recommended_quantity: r.recommended_quantity,
            current_planned_quantity: r.current_planned_quantity.unwrap_or(0),
            confidence_score: r.confidence_score,
            factors: r.factors.unwrap_or_else(|| serde_json::json!({})),
            status: r.status.unwrap_or_default(),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductionRecommendationResponse {
    pub id: Uuid,
    #[schema(example = 42)]
    pub product_id: i32,
    #[schema(example = "2024-01-10")]
    pub date: NaiveDate,
    #[schema(example = 40)]
    pub recommended_quantity: i32,
    #[schema(example = 30)]
    pub current_planned_quantity: i32,
    #[schema(value_type = String, example = "0.85")]
    pub confidence_score: Decimal,
    pub factors: serde_json::Value,
    pub status: RecommendationStatus,
    pub created_at: DateTime<Utc>,
    pub applied_at: Option<DateTime<Utc>>,
}

impl From<production_recommendation::Model> for ProductionRecommendationResponse {
    fn from(m: production_recommendation::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            date: m.date,
            recommended_quantity: m.recommended_quantity,
            current_planned_quantity: m.current_planned_quantity,
            confidence_score: m.confidence_score,
            factors: m.factors,
            status: m.status,
            created_at: m.created_at,
            applied_at: m.applied_at,
        }
    }
}
