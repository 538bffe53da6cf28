use chrono::{DateTime, Utc};
use common::{OrderOrigin, PromotionStatus, PromotionType, TargetAudience};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::autopilot::PromotionSummary;
use crate::autopilot::promotions::NewPromotion;
use crate::entity::promotion;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPromotionsParams {
    /// Maximum promotions returned (1-200, default 50).
    #[param(example = 50)]
    pub limit: Option<u64>,
}

/// Request body for creating a promotion by hand.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreatePromotionRequest {
    /// Omit for promotions that cover more than one product.
    #[schema(example = 42)]
    pub product_id: Option<i32>,
    pub promotion_type: PromotionType,
    #[schema(example = 20)]
    pub discount_percentage: i32,
    #[schema(example = "Weekend flash sale on all pastries")]
    pub message: String,
    /// Defaults to `all`.
    pub target_audience: Option<TargetAudience>,
    /// Defaults to `["email", "push"]`.
    #[schema(example = json!(["email"]))]
    pub channels: Option<Vec<String>>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Defaults to `scheduled`.
    pub status: Option<PromotionStatus>,
}

impl From<CreatePromotionRequest> for NewPromotion {
    fn from(r: CreatePromotionRequest) -> Self {
        Self {
            product_id: r.product_id,
            promotion_type: r.promotion_type,
            discount_percentage: r.discount_percentage,
            message: r.message,
            target_audience: r.target_audience.unwrap_or(TargetAudience::All),
            channels: r
                .channels
                .unwrap_or_else(|| vec!["email".into(), "push".into()]),
            start_time: r.start_time,
            end_time: r.end_time,
            status: r.status.unwrap_or(PromotionStatus::Scheduled),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PromotionResponse {
    pub id: Uuid,
    pub product_id: Option<i32>,
    pub promotion_type: PromotionType,
    #[schema(example = 30)]
    pub discount_percentage: i32,
    #[schema(example = "Last chance! Sourdough at 30% off. Expires soon.")]
    pub message: String,
    pub target_audience: TargetAudience,
    /// Channel names, e.g. `["email", "push"]`.
    pub channels: serde_json::Value,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: PromotionStatus,
    pub sent_count: i32,
    pub conversion_count: i32,
    pub created_by: OrderOrigin,
    pub created_at: DateTime<Utc>,
}

impl From<promotion::Model> for PromotionResponse {
    fn from(m: promotion::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            promotion_type: m.promotion_type,
            discount_percentage: m.discount_percentage,
            message: m.message,
            target_audience: m.target_audience,
            channels: m.channels,
            start_time: m.start_time,
            end_time: m.end_time,
            status: m.status,
            sent_count: m.sent_count,
            conversion_count: m.conversion_count,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}

/// Result of an expiring-soon run.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PromotionRunResponse {
    #[schema(example = 2)]
    pub created: u64,
    /// Names of the promoted products.
    #[schema(example = json!(["Sourdough", "Rye"]))]
    pub products: Vec<String>,
}

impl From<PromotionSummary> for PromotionRunResponse {
    fn from(s: PromotionSummary) -> Self {
        Self {
            created: s.created,
            products: s.products,
        }
    }
}
