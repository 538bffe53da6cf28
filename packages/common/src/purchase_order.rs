#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a purchase order.
///
/// The autopilot only ever creates orders in `Draft`; every later transition
/// belongs to the approval workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "draft"))]
    Draft,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pending_approval"))]
    PendingApproval,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "approved"))]
    Approved,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "sent"))]
    Sent,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "received"))]
    Received,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "cancelled"))]
    Cancelled,
}

impl_str_conversions!(PurchaseOrderStatus, "purchase order status", {
    Draft => "draft",
    PendingApproval => "pending_approval",
    Approved => "approved",
    Sent => "sent",
    Received => "received",
    Cancelled => "cancelled",
});

/// Who created a record: the autopilot or a person.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum OrderOrigin {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "autopilot"))]
    Autopilot,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "manual"))]
    Manual,
}

impl_str_conversions!(OrderOrigin, "origin", {
    Autopilot => "autopilot",
    Manual => "manual",
});
