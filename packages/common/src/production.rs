#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

/// Review state of a production recommendation.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    /// Waiting for someone to accept or reject it.
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pending"))]
    Pending,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "accepted"))]
    Accepted,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "rejected"))]
    Rejected,
    /// Applied to the production plan without review.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "auto_applied"))]
    AutoApplied,
}

impl_str_conversions!(RecommendationStatus, "recommendation status", {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
    AutoApplied => "auto_applied",
});

impl RecommendationStatus {
    /// Returns true if the recommendation changed the production plan.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Accepted | Self::AutoApplied)
    }
}
