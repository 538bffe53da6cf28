#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

/// Kind of automated action recorded in the action log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "price_sync"))]
    PriceSync,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "promotion_sent"))]
    PromotionSent,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "production_adjusted"))]
    ProductionAdjusted,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "order_created"))]
    OrderCreated,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "inventory_reorder"))]
    InventoryReorder,
}

impl_str_conversions!(ActionType, "action type", {
    PriceSync => "price_sync",
    PromotionSent => "promotion_sent",
    ProductionAdjusted => "production_adjusted",
    OrderCreated => "order_created",
    InventoryReorder => "inventory_reorder",
});

/// Outcome of a logged action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "success"))]
    Success,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "failed"))]
    Failed,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "in_progress"))]
    InProgress,
}

impl_str_conversions!(ActionStatus, "action status", {
    Success => "success",
    Failed => "failed",
    InProgress => "in_progress",
});

/// An autopilot module. Each one can be switched on per tenant and owns the
/// action-log entries it writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum AutopilotModule {
    /// Price-sync queue processing.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pricing"))]
    Pricing,
    /// Expiring-soon promotions.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "promotions"))]
    Promotions,
    /// Production recommendations. Has no automated job in this service.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "production"))]
    Production,
    /// Reorder scanning.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "inventory"))]
    Inventory,
}

impl_str_conversions!(AutopilotModule, "module", {
    Pricing => "pricing",
    Promotions => "promotions",
    Production => "production",
    Inventory => "inventory",
});
