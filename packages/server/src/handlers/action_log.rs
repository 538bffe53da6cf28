use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::autopilot::action_log::list_action_logs as list_recent;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::TenantUser;
use crate::models::action_log::*;
use crate::state::AppState;

use super::list_limit;

/// List recent autopilot actions.
#[utoipa::path(
    get,
    path = "/action-logs",
    tag = "Action Log",
    operation_id = "listActionLogs",
    summary = "List action log entries",
    description = "Returns the caller's most recent autopilot actions, newest first.",
    params(ListActionLogsParams),
    responses(
        (status = 200, description = "Action log entries", body = Vec<ActionLogResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn list_action_logs(
    user: TenantUser,
    State(state): State<AppState>,
    Query(params): Query<ListActionLogsParams>,
) -> Result<Json<Vec<ActionLogResponse>>, AppError> {
    let logs = list_recent(&state.db, &user.tenant, list_limit(params.limit)).await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}
