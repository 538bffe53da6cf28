use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::autopilot::activate_expiring_soon_promotions;
use crate::autopilot::promotions::{create_promotion as create, list_promotions as list_all};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::TenantUser;
use crate::extractors::json::AppJson;
use crate::models::promotions::*;
use crate::state::AppState;

use super::list_limit;

/// List promotions.
#[utoipa::path(
    get,
    path = "/promotions",
    tag = "Promotions",
    operation_id = "listPromotions",
    summary = "List promotions",
    params(ListPromotionsParams),
    responses(
        (status = 200, description = "Promotions, newest first", body = Vec<PromotionResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn list_promotions(
    user: TenantUser,
    State(state): State<AppState>,
    Query(params): Query<ListPromotionsParams>,
) -> Result<Json<Vec<PromotionResponse>>, AppError> {
    let promotions = list_all(&state.db, &user.tenant, list_limit(params.limit)).await?;
    Ok(Json(promotions.into_iter().map(Into::into).collect()))
}

/// Create a promotion by hand.
#[utoipa::path(
    post,
    path = "/promotions",
    tag = "Promotions",
    operation_id = "createPromotion",
    summary = "Create a promotion",
    request_body = CreatePromotionRequest,
    responses(
        (status = 201, description = "Promotion created", body = PromotionResponse),
        (status = 400, description = "Invalid discount, message or time range (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user, payload), fields(tenant = %user.tenant))]
pub async fn create_promotion(
    user: TenantUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePromotionRequest>,
) -> Result<(StatusCode, Json<PromotionResponse>), AppError> {
    let promotion = create(&state.db, &user.tenant, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(promotion.into())))
}

/// Create promotions for products about to expire.
#[utoipa::path(
    post,
    path = "/promotions/expiring-soon",
    tag = "Promotions",
    operation_id = "activateExpiringSoonPromotions",
    summary = "Activate expiring-soon promotions",
    description = "Creates a discount promotion for every product expiring within the configured window that has no active one yet.",
    responses(
        (status = 200, description = "Run summary", body = PromotionRunResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn activate_expiring_soon(
    user: TenantUser,
    State(state): State<AppState>,
) -> Result<Json<PromotionRunResponse>, AppError> {
    let summary = activate_expiring_soon_promotions(
        &state.db,
        &user.tenant,
        &state.config.autopilot.promotions,
    )
    .await?;
    Ok(Json(summary.into()))
}
