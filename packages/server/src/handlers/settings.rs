use axum::{
    Json,
    extract::{Path, State},
};
use common::AutopilotModule;
use tracing::instrument;

use crate::autopilot::settings::{
    ModuleSettings, get_settings as load_settings, update_settings as save_settings,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::TenantUser;
use crate::extractors::json::AppJson;
use crate::models::settings::*;
use crate::state::AppState;

/// Get autopilot settings for every module.
#[utoipa::path(
    get,
    path = "/autopilot/settings",
    tag = "Settings",
    operation_id = "getAutopilotSettings",
    summary = "Get autopilot settings",
    description = "Returns one entry per module. Modules that were never configured report defaults with `persisted = false`.",
    responses(
        (status = 200, description = "Module settings", body = Vec<ModuleSettingsResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn get_settings(
    user: TenantUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ModuleSettingsResponse>>, AppError> {
    let settings = load_settings(&state.db, &user.tenant).await?;
    Ok(Json(settings.into_iter().map(Into::into).collect()))
}

/// Update the settings of one module.
#[utoipa::path(
    put,
    path = "/autopilot/settings/{module}",
    tag = "Settings",
    operation_id = "updateAutopilotSettings",
    summary = "Update module settings",
    description = "Partially updates a module's settings, creating them on first use.",
    params(("module" = String, Path, description = "Module name: pricing, promotions, production or inventory")),
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = ModuleSettingsResponse),
        (status = 400, description = "Unknown module or malformed body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user, payload), fields(tenant = %user.tenant))]
pub async fn update_settings(
    user: TenantUser,
    State(state): State<AppState>,
    Path(module): Path<String>,
    AppJson(payload): AppJson<UpdateSettingsRequest>,
) -> Result<Json<ModuleSettingsResponse>, AppError> {
    let module = module
        .parse::<AutopilotModule>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let model = save_settings(&state.db, &user.tenant, module, payload.into()).await?;
    Ok(Json(ModuleSettings::from(model).into()))
}
