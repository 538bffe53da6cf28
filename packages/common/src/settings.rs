#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

/// How often the scheduler runs an active autopilot module.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionFrequency {
    /// Every scheduler tick.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "realtime"))]
    Realtime,
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "hourly"))]
    Hourly,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "daily"))]
    Daily,
}

impl_str_conversions!(ExecutionFrequency, "execution frequency", {
    Realtime => "realtime",
    Hourly => "hourly",
    Daily => "daily",
});

impl ExecutionFrequency {
    /// Minimum number of seconds between two runs.
    pub fn min_interval_secs(&self) -> i64 {
        match self {
            Self::Realtime => 0,
            Self::Hourly => 60 * 60,
            Self::Daily => 24 * 60 * 60,
        }
    }
}
