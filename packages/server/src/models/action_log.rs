use chrono::{DateTime, Utc};
use common::{ActionStatus, ActionType, AutopilotModule};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::action_log;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListActionLogsParams {
    /// Maximum entries returned (1-200, default 50).
    #[param(example = 50)]
    pub limit: Option<u64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ActionLogResponse {
    pub id: Uuid,
    pub action_type: ActionType,
    pub module: AutopilotModule,
    #[schema(example = "Price synced for product 42: $10 → $8.5")]
    pub description: String,
    pub status: ActionStatus,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<action_log::Model> for ActionLogResponse {
    fn from(m: action_log::Model) -> Self {
        Self {
            id: m.id,
            action_type: m.action_type,
            module: m.module,
            description: m.description,
            status: m.status,
            metadata: m.metadata,
            created_at: m.created_at,
        }
    }
}
