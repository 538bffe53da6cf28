use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::autopilot::production::{
    create_production_recommendation as create_recommendation,
    list_production_recommendations as list_recommendations,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::TenantUser;
use crate::extractors::json::AppJson;
use crate::models::production::*;
use crate::state::AppState;

use super::list_limit;

/// List production recommendations.
#[utoipa::path(
    get,
    path = "/production-recommendations",
    tag = "Production",
    operation_id = "listProductionRecommendations",
    summary = "List production recommendations",
    description = "Returns the caller's recommendations, latest production day first.",
    params(ListProductionRecommendationsParams),
    responses(
        (status = 200, description = "Recommendations", body = Vec<ProductionRecommendationResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn list_production_recommendations(
    user: TenantUser,
    State(state): State<AppState>,
    Query(params): Query<ListProductionRecommendationsParams>,
) -> Result<Json<Vec<ProductionRecommendationResponse>>, AppError> {
    let recs = list_recommendations(&state.db, &user.tenant, list_limit(params.limit)).await?;
    Ok(Json(recs.into_iter().map(Into::into).collect()))
}

/// Record a production recommendation.
#[utoipa::path(
    post,
    path = "/production-recommendations",
    tag = "Production",
    operation_id = "createProductionRecommendation",
    summary = "Record a production recommendation",
    description = "Recommendations created as `auto_applied` are stamped as applied and logged as a production adjustment.",
    request_body = CreateProductionRecommendationRequest,
    responses(
        (status = 201, description = "Recommendation recorded", body = ProductionRecommendationResponse),
        (status = 400, description = "Invalid quantities or confidence (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user, payload), fields(tenant = %user.tenant, product_id = payload.product_id))]
pub async fn create_production_recommendation(
    user: TenantUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductionRecommendationRequest>,
) -> Result<(StatusCode, Json<ProductionRecommendationResponse>), AppError> {
    let rec = create_recommendation(&state.db, &user.tenant, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(rec.into())))
}
