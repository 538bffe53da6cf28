use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use common::{OrderOrigin, PurchaseOrderStatus};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entity::purchase_order::PurchaseOrderItem;
use crate::entity::{product, purchase_order, reorder_rule};

use super::reorder::generate_order_number;
use super::{AutopilotError, Tenant};

/// A reorder rule to create.
#[derive(Debug, Clone)]
pub struct NewReorderRule {
    pub product_id: i32,
    pub supplier_id: Option<String>,
    pub min_stock_level: i32,
    pub reorder_quantity: i32,
    pub lead_time_days: i32,
    pub is_active: bool,
}

impl NewReorderRule {
    pub fn validate(&self) -> Result<(), AutopilotError> {
        if self.min_stock_level < 0 {
            return Err(AutopilotError::Validation(
                "min_stock_level must not be negative".into(),
            ));
        }
        if self.reorder_quantity <= 0 {
            return Err(AutopilotError::Validation(
                "reorder_quantity must be positive".into(),
            ));
        }
        if self.lead_time_days < 0 {
            return Err(AutopilotError::Validation(
                "lead_time_days must not be negative".into(),
            ));
        }
        Ok(())
    }
}

pub async fn create_reorder_rule(
    db: &DatabaseConnection,
    tenant: &Tenant,
    rule: NewReorderRule,
) -> Result<reorder_rule::Model, AutopilotError> {
    rule.validate()?;
    owned_product(db, tenant, rule.product_id).await?;

    let now = Utc::now();
    let model = reorder_rule::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(tenant.as_str().to_owned()),
        product_id: Set(rule.product_id),
        supplier_id: Set(rule.supplier_id),
        min_stock_level: Set(rule.min_stock_level),
        reorder_quantity: Set(rule.reorder_quantity),
        lead_time_days: Set(rule.lead_time_days),
        is_active: Set(rule.is_active),
        last_order_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(tenant = %tenant, rule_id = %model.id, product_id = model.product_id, "Created reorder rule");
    Ok(model)
}

/// A purchase order entered by hand.
#[derive(Debug, Clone)]
pub struct NewPurchaseOrder {
    pub supplier_id: Option<String>,
    pub supplier_name: String,
    pub status: PurchaseOrderStatus,
    pub expected_delivery: Option<NaiveDate>,
    pub total_amount: Decimal,
    pub items: Vec<PurchaseOrderItem>,
    pub approval_required: bool,
}

impl NewPurchaseOrder {
    pub fn validate(&self) -> Result<(), AutopilotError> {
        if self.supplier_name.trim().is_empty() {
            return Err(AutopilotError::Validation(
                "supplier_name must not be empty".into(),
            ));
        }
        if self.total_amount.is_sign_negative() {
            return Err(AutopilotError::Validation(
                "total_amount must not be negative".into(),
            ));
        }
        if self.items.is_empty() {
            return Err(AutopilotError::Validation(
                "an order needs at least one item".into(),
            ));
        }
        if self.items.iter().any(|item| item.quantity <= 0) {
            return Err(AutopilotError::Validation(
                "item quantities must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Create a manual purchase order. Every item must reference one of the
/// tenant's products.
pub async fn create_purchase_order(
    db: &DatabaseConnection,
    tenant: &Tenant,
    order: NewPurchaseOrder,
) -> Result<purchase_order::Model, AutopilotError> {
    order.validate()?;

    let product_ids: BTreeSet<i32> = order.items.iter().map(|item| item.product_id).collect();
    let owned = product::Entity::find()
        .filter(product::Column::UserId.eq(tenant.as_str()))
        .filter(product::Column::Id.is_in(product_ids.iter().copied()))
        .count(db)
        .await?;
    if owned != product_ids.len() as u64 {
        return Err(AutopilotError::NotFound(
            "One or more order items reference an unknown product".into(),
        ));
    }

    let items = serde_json::to_value(&order.items)
        .map_err(|e| AutopilotError::Validation(format!("invalid order items: {e}")))?;

    let now = Utc::now();
    let model = purchase_order::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(tenant.as_str().to_owned()),
        order_number: Set(generate_order_number()),
        supplier_id: Set(order.supplier_id),
        supplier_name: Set(order.supplier_name.trim().to_owned()),
        status: Set(order.status),
        order_date: Set(now),
        expected_delivery: Set(order.expected_delivery),
        total_amount: Set(order.total_amount),
        items: Set(items),
        created_by: Set(OrderOrigin::Manual),
        approved_by: Set(None),
        approval_required: Set(order.approval_required),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(tenant = %tenant, order_number = %model.order_number, "Created purchase order");
    Ok(model)
}

/// Rules of `tenant`, oldest first, optionally filtered by `is_active`.
pub async fn list_reorder_rules(
    db: &DatabaseConnection,
    tenant: &Tenant,
    active: Option<bool>,
) -> Result<Vec<reorder_rule::Model>, DbErr> {
    let mut query =
        reorder_rule::Entity::find().filter(reorder_rule::Column::UserId.eq(tenant.as_str()));
    if let Some(active) = active {
        query = query.filter(reorder_rule::Column::IsActive.eq(active));
    }
    query
        .order_by_asc(reorder_rule::Column::CreatedAt)
        .all(db)
        .await
}

/// Purchase orders of `tenant`, newest order date first.
pub async fn list_purchase_orders(
    db: &DatabaseConnection,
    tenant: &Tenant,
    limit: u64,
) -> Result<Vec<purchase_order::Model>, DbErr> {
    purchase_order::Entity::find()
        .filter(purchase_order::Column::UserId.eq(tenant.as_str()))
        .order_by_desc(purchase_order::Column::OrderDate)
        .limit(limit)
        .all(db)
        .await
}

/// The product `product_id` of `tenant`, or `NotFound`.
pub(crate) async fn owned_product(
    db: &DatabaseConnection,
    tenant: &Tenant,
    product_id: i32,
) -> Result<product::Model, AutopilotError> {
    product::Entity::find_by_id(product_id)
        .filter(product::Column::UserId.eq(tenant.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| AutopilotError::NotFound(format!("Product {product_id} not found")))
}
