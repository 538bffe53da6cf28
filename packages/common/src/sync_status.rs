#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

/// Status of a price-sync queue entry.
///
/// Entries start as `Pending`, are claimed into `Syncing` by a single
/// processor run and end as `Completed` or `Failed`. Nothing moves an entry
/// out of a final state; failed changes are re-enqueued by the caller.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Waiting to be claimed by a processor run.
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pending"))]
    Pending,
    /// Claimed by a processor run that has not finished with it yet.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "syncing"))]
    Syncing,
    /// The new price was written to the product.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "completed"))]
    Completed,
    /// The change could not be applied; see the entry's error message.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "failed"))]
    Failed,
}

impl_str_conversions!(SyncStatus, "sync status", {
    Pending => "pending",
    Syncing => "syncing",
    Completed => "completed",
    Failed => "failed",
});

/// Sales channel a price change is destined for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum TargetSystem {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pos"))]
    Pos,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "website"))]
    Website,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "app"))]
    App,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "all"))]
    All,
}

impl_str_conversions!(TargetSystem, "target system", {
    Pos => "pos",
    Website => "website",
    App => "app",
    All => "all",
});
