use common::{ActionStatus, ActionType, AutopilotModule};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only record of an automated action.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "action_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub user_id: String,

    #[sea_orm(indexed)]
    pub action_type: ActionType,

    pub module: AutopilotModule,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub status: ActionStatus,

    #[sea_orm(column_type = "JsonBinary")]
    pub metadata: serde_json::Value,

    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
