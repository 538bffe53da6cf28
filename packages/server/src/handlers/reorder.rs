use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::autopilot::check_inventory_and_reorder;
use crate::autopilot::purchasing::{
    create_purchase_order as create_order, create_reorder_rule as create_rule,
    list_purchase_orders as list_orders, list_reorder_rules as list_rules,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::TenantUser;
use crate::extractors::json::AppJson;
use crate::models::reorder::*;
use crate::state::AppState;

use super::list_limit;

/// List reorder rules.
#[utoipa::path(
    get,
    path = "/reorder-rules",
    tag = "Reorder",
    operation_id = "listReorderRules",
    summary = "List reorder rules",
    params(ListReorderRulesParams),
    responses(
        (status = 200, description = "Reorder rules", body = Vec<ReorderRuleResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn list_reorder_rules(
    user: TenantUser,
    State(state): State<AppState>,
    Query(params): Query<ListReorderRulesParams>,
) -> Result<Json<Vec<ReorderRuleResponse>>, AppError> {
    let rules = list_rules(&state.db, &user.tenant, params.active).await?;
    Ok(Json(rules.into_iter().map(Into::into).collect()))
}

/// Create a reorder rule.
#[utoipa::path(
    post,
    path = "/reorder-rules",
    tag = "Reorder",
    operation_id = "createReorderRule",
    summary = "Create a reorder rule",
    request_body = CreateReorderRuleRequest,
    responses(
        (status = 201, description = "Rule created", body = ReorderRuleResponse),
        (status = 400, description = "Invalid thresholds (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user, payload), fields(tenant = %user.tenant, product_id = payload.product_id))]
pub async fn create_reorder_rule(
    user: TenantUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateReorderRuleRequest>,
) -> Result<(StatusCode, Json<ReorderRuleResponse>), AppError> {
    let rule = create_rule(&state.db, &user.tenant, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(rule.into())))
}

/// Run the reorder scan.
#[utoipa::path(
    post,
    path = "/reorder/check",
    tag = "Reorder",
    operation_id = "checkInventoryAndReorder",
    summary = "Check inventory and draft purchase orders",
    description = "Evaluates every active rule and drafts a purchase order for each product at or below its minimum stock level.",
    responses(
        (status = 200, description = "Scan summary", body = ReorderRunResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn check_inventory(
    user: TenantUser,
    State(state): State<AppState>,
) -> Result<Json<ReorderRunResponse>, AppError> {
    let summary =
        check_inventory_and_reorder(&state.db, &user.tenant, &state.config.autopilot).await?;
    Ok(Json(summary.into()))
}

/// List purchase orders.
#[utoipa::path(
    get,
    path = "/purchase-orders",
    tag = "Reorder",
    operation_id = "listPurchaseOrders",
    summary = "List purchase orders",
    description = "Returns the caller's purchase orders, newest order date first.",
    params(ListPurchaseOrdersParams),
    responses(
        (status = 200, description = "Purchase orders", body = Vec<PurchaseOrderResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user), fields(tenant = %user.tenant))]
pub async fn list_purchase_orders(
    user: TenantUser,
    State(state): State<AppState>,
    Query(params): Query<ListPurchaseOrdersParams>,
) -> Result<Json<Vec<PurchaseOrderResponse>>, AppError> {
    let orders = list_orders(&state.db, &user.tenant, list_limit(params.limit)).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// Create a purchase order by hand.
#[utoipa::path(
    post,
    path = "/purchase-orders",
    tag = "Reorder",
    operation_id = "createPurchaseOrder",
    summary = "Create a purchase order",
    description = "Creates a manual order with a generated order number. Every item must reference one of the caller's products.",
    request_body = CreatePurchaseOrderRequest,
    responses(
        (status = 201, description = "Order created", body = PurchaseOrderResponse),
        (status = 400, description = "Invalid order (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Unknown product (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, user, payload), fields(tenant = %user.tenant))]
pub async fn create_purchase_order(
    user: TenantUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePurchaseOrderRequest>,
) -> Result<(StatusCode, Json<PurchaseOrderResponse>), AppError> {
    let order = create_order(&state.db, &user.tenant, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}
