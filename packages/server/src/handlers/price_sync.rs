use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use common::SyncStatus;
use tracing::instrument;

use crate::autopilot::price_sync::{enqueue_price_change as enqueue, process_price_sync_queue};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::TenantUser;
use crate::extractors::json::AppJson;
use crate::models::price_sync::*;
use crate::queue::price_sync_queue;
use crate::state::AppState;

use super::list_limit;

/// List price-sync queue entries.
#[utoipa::path(
    get,
    path = "/price-sync/queue",
    tag = "Price Sync",
    operation_id = "listPriceSyncQueue",
    summary = "List price-sync queue entries",
    description = "Returns the caller's queue entries, newest first, optionally filtered by status.",
    params(ListQueueParams),
    responses(
        (status = 200, description = "Queue entries", body = Vec<PriceSyncEntryResponse>),
        (status = 400, description = "Unknown status (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn list_price_sync_queue(
    user: TenantUser,
    State(state): State<AppState>,
    Query(params): Query<ListQueueParams>,
) -> Result<Json<Vec<PriceSyncEntryResponse>>, AppError> {
    let status = params
        .status
        .map(|s| s.parse::<SyncStatus>())
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entries = price_sync_queue(&state.db)
        .list(&user.tenant, status, list_limit(params.limit))
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Enqueue a price change.
#[utoipa::path(
    post,
    path = "/price-sync/queue",
    tag = "Price Sync",
    operation_id = "enqueuePriceChange",
    summary = "Enqueue a price change",
    description = "Adds a pending price change for one of the caller's products.",
    request_body = EnqueuePriceChangeRequest,
    responses(
        (status = 201, description = "Entry enqueued", body = PriceSyncEntryResponse),
        (status = 400, description = "Negative price or malformed body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user, payload), fields(tenant = %user.tenant, product_id = payload.product_id))]
pub async fn enqueue_price_change(
    user: TenantUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<EnqueuePriceChangeRequest>,
) -> Result<(StatusCode, Json<PriceSyncEntryResponse>), AppError> {
    let entry = enqueue(&state.db, &user.tenant, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Process pending price changes.
#[utoipa::path(
    post,
    path = "/price-sync/process",
    tag = "Price Sync",
    operation_id = "processPriceSyncQueue",
    summary = "Process the price-sync queue",
    description = "Claims up to the configured batch size of pending entries, newest first, and applies each one.",
    responses(
        (status = 200, description = "Run summary", body = PriceSyncRunResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn process_queue(
    user: TenantUser,
    State(state): State<AppState>,
) -> Result<Json<PriceSyncRunResponse>, AppError> {
    let summary =
        process_price_sync_queue(&state.db, &user.tenant, state.config.autopilot.batch_size)
            .await?;
    Ok(Json(summary.into()))
}
