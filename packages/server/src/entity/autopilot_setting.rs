use common::{AutopilotModule, ExecutionFrequency};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-tenant switch and cadence for one autopilot module.
///
/// At most one row exists per (user_id, module_name); see `database::ensure_indexes`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "autopilot_setting")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub user_id: String,

    pub module_name: AutopilotModule,

    #[sea_orm(default_value = false, indexed)]
    pub is_active: bool,

    pub execution_frequency: ExecutionFrequency,

    pub last_execution: Option<DateTimeUtc>,

    /// Free-form module configuration.
    #[sea_orm(column_type = "JsonBinary")]
    pub config: serde_json::Value,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
