use chrono::Utc;
use common::{ActionStatus, ActionType, AutopilotModule};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::error;
use uuid::Uuid;

use crate::entity::action_log;

use super::Tenant;

/// An action-log entry to append.
#[derive(Debug, Clone)]
pub struct NewActionLog {
    pub action_type: ActionType,
    pub module: AutopilotModule,
    pub description: String,
    pub status: ActionStatus,
    pub metadata: serde_json::Value,
}

impl NewActionLog {
    pub fn success(
        action_type: ActionType,
        module: AutopilotModule,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action_type,
            module,
            description: description.into(),
            status: ActionStatus::Success,
            metadata: serde_json::json!({}),
        }
    }

    pub fn failed(
        action_type: ActionType,
        module: AutopilotModule,
        description: impl Into<String>,
    ) -> Self {
        Self {
            status: ActionStatus::Failed,
            ..Self::success(action_type, module, description)
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Append an entry to the action log of `tenant`.
pub async fn record_action<C: ConnectionTrait>(
    conn: &C,
    tenant: &Tenant,
    log: NewActionLog,
) -> Result<action_log::Model, DbErr> {
    let entry = action_log::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(tenant.as_str().to_owned()),
        action_type: Set(log.action_type),
        module: Set(log.module),
        description: Set(log.description),
        status: Set(log.status),
        metadata: Set(log.metadata),
        created_at: Set(Utc::now()),
    };
    entry.insert(conn).await
}

/// Like [`record_action`], but a write failure is only logged.
///
/// For audit entries whose loss must not undo or abort the action itself.
pub async fn record_action_best_effort<C: ConnectionTrait>(
    conn: &C,
    tenant: &Tenant,
    log: NewActionLog,
) {
    let action_type = log.action_type;
    if let Err(e) = record_action(conn, tenant, log).await {
        error!(
            tenant = %tenant,
            action_type = %action_type,
            error = %e,
            "Failed to write action log entry"
        );
    }
}

/// Most recent entries of `tenant`, newest first.
pub async fn list_action_logs<C: ConnectionTrait>(
    conn: &C,
    tenant: &Tenant,
    limit: u64,
) -> Result<Vec<action_log::Model>, DbErr> {
    action_log::Entity::find()
        .filter(action_log::Column::UserId.eq(tenant.as_str()))
        .order_by_desc(action_log::Column::CreatedAt)
        .limit(limit)
        .all(conn)
        .await
}
