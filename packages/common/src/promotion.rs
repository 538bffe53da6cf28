#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "flash_sale"))]
    FlashSale,
    /// Discount on a product that is about to expire.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "expiration_alert"))]
    ExpirationAlert,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "bundle_offer"))]
    BundleOffer,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "clearance"))]
    Clearance,
}

impl_str_conversions!(PromotionType, "promotion type", {
    FlashSale => "flash_sale",
    ExpirationAlert => "expiration_alert",
    BundleOffer => "bundle_offer",
    Clearance => "clearance",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "scheduled"))]
    Scheduled,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "active"))]
    Active,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "expired"))]
    Expired,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "cancelled"))]
    Cancelled,
}

impl_str_conversions!(PromotionStatus, "promotion status", {
    Scheduled => "scheduled",
    Active => "active",
    Expired => "expired",
    Cancelled => "cancelled",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum TargetAudience {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "all"))]
    All,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "vip"))]
    Vip,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "app_users"))]
    AppUsers,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "email_subscribers"))]
    EmailSubscribers,
}

impl_str_conversions!(TargetAudience, "target audience", {
    All => "all",
    Vip => "vip",
    AppUsers => "app_users",
    EmailSubscribers => "email_subscribers",
});
