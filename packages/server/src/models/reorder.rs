use chrono::{DateTime, NaiveDate, Utc};
use common::{OrderOrigin, PurchaseOrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::autopilot::ReorderSummary;
use crate::autopilot::purchasing::{NewPurchaseOrder, NewReorderRule};
use crate::entity::purchase_order::PurchaseOrderItem;
use crate::entity::{purchase_order, reorder_rule};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListReorderRulesParams {
    /// Filter by active flag.
    #[param(example = true)]
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPurchaseOrdersParams {
    /// Maximum orders returned (1-200, default 50).
    #[param(example = 50)]
    pub limit: Option<u64>,
}

/// Request body for creating a reorder rule.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateReorderRuleRequest {
    #[schema(example = 42)]
    pub product_id: i32,
    #[schema(example = "supplier-7")]
    pub supplier_id: Option<String>,
    /// Reorder when stock is at or below this level.
    #[schema(example = 5)]
    pub min_stock_level: i32,
    #[schema(example = 20)]
    pub reorder_quantity: i32,
    #[schema(example = 3)]
    pub lead_time_days: i32,
    /// Defaults to true.
    pub is_active: Option<bool>,
}

impl From<CreateReorderRuleRequest> for NewReorderRule {
    fn from(r: CreateReorderRuleRequest) -> Self {
        Self {
            product_id: r.product_id,
            supplier_id: r.supplier_id,
            min_stock_level: r.min_stock_level,
            reorder_quantity: r.reorder_quantity,
            lead_time_days: r.lead_time_days,
            is_active: r.is_active.unwrap_or(true),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ReorderRuleResponse {
    pub id: Uuid,
    #[schema(example = 42)]
    pub product_id: i32,
    pub supplier_id: Option<String>,
    #[schema(example = 5)]
    pub min_stock_level: i32,
    #[schema(example = 20)]
    pub reorder_quantity: i32,
    #[schema(example = 3)]
    pub lead_time_days: i32,
    pub is_active: bool,
    pub last_order_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<reorder_rule::Model> for ReorderRuleResponse {
    fn from(m: reorder_rule::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            supplier_id: m.supplier_id,
            min_stock_level: m.min_stock_level,
            reorder_quantity: m.reorder_quantity,
            lead_time_days: m.lead_time_days,
            is_active: m.is_active,
            last_order_date: m.last_order_date,
            created_at: m.created_at,
        }
    }
}

/// One line of a purchase order.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PurchaseOrderItemRequest {
    #[schema(example = 42)]
    pub product_id: i32,
    #[schema(example = "Flour")]
    pub product_name: String,
    #[schema(example = 40)]
    pub quantity: i32,
}

/// Request body for creating a purchase order by hand.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreatePurchaseOrderRequest {
    #[schema(example = "supplier-7")]
    pub supplier_id: Option<String>,
    #[schema(example = "Mill & Co")]
    pub supplier_name: String,
    /// Defaults to `draft`.
    pub status: Option<PurchaseOrderStatus>,
    #[schema(example = "2024-01-13")]
    pub expected_delivery: Option<NaiveDate>,
    /// Defaults to 0.
    #[schema(value_type = Option<String>, example = "120.00")]
    pub total_amount: Option<Decimal>,
    pub items: Vec<PurchaseOrderItemRequest>,
    /// Defaults to true.
    pub approval_required: Option<bool>,
}

impl From<CreatePurchaseOrderRequest> for NewPurchaseOrder {
    fn from(r: CreatePurchaseOrderRequest) -> Self {
        Self {
            supplier_id: r.supplier_id,
            supplier_name: r.supplier_name,
            status: r.status.unwrap_or(PurchaseOrderStatus::Draft),
            expected_delivery: r.expected_delivery,
            total_amount: r.total_amount.unwrap_or(Decimal::ZERO),
            items: r
                .items
                .into_iter()
                .map(|item| PurchaseOrderItem {
                    product_id: item.product_id,
                    product_name: item.product_name,
                    quantity: item.quantity,
                })
                .collect(),
            approval_required: r.approval_required.unwrap_or(true),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PurchaseOrderResponse {
    pub id: Uuid,
    #[schema(example = "PO-01890A5D4C8B7E3F9A2B6C1D0E4F5A6B")]
    pub order_number: String,
    pub supplier_id: Option<String>,
    #[schema(example = "Automatic Supplier")]
    pub supplier_name: String,
    pub status: PurchaseOrderStatus,
    pub order_date: DateTime<Utc>,
    #[schema(example = "2024-01-13")]
    pub expected_delivery: Option<NaiveDate>,
    #[schema(value_type = String, example = "0")]
    pub total_amount: Decimal,
    /// Order lines: `[{product_id, product_name, quantity}]`.
    pub items: serde_json::Value,
    pub created_by: OrderOrigin,
    pub approval_required: bool,
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<purchase_order::Model> for PurchaseOrderResponse {
    fn from(m: purchase_order::Model) -> Self {
        Self {
            id: m.id,
            order_number: m.order_number,
            supplier_id: m.supplier_id,
            supplier_name: m.supplier_name,
            status: m.status,
            order_date: m.order_date,
            expected_delivery: m.expected_delivery,
            total_amount: m.total_amount,
            items: m.items,
            created_by: m.created_by,
            approval_required: m.approval_required,
            approved_by: m.approved_by,
            created_at: m.created_at,
        }
    }
}

/// Result of a reorder scan.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ReorderRunResponse {
    #[schema(example = 1)]
    pub orders_created: u64,
    /// Rules that could not be evaluated.
    #[schema(example = 0)]
    pub rules_failed: u64,
}

impl From<ReorderSummary> for ReorderRunResponse {
    fn from(s: ReorderSummary) -> Self {
        Self {
            orders_created: s.orders_created,
            rules_failed: s.rules_failed,
        }
    }
}
