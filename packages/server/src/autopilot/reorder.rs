use chrono::{DateTime, Days, NaiveDate, Utc};
use common::{ActionType, AutopilotConfig, AutopilotModule, OrderOrigin, PurchaseOrderStatus};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::entity::purchase_order::PurchaseOrderItem;
use crate::entity::{product, purchase_order, reorder_rule};

use super::action_log::{NewActionLog, record_action, record_action_best_effort};
use super::{AutopilotError, Tenant};

/// Outcome counts of one reorder scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderSummary {
    pub orders_created: u64,
    pub rules_failed: u64,
}

/// Why a single rule could not be evaluated.
#[derive(Debug, thiserror::Error)]
enum ReorderError {
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),

    #[error("failed to encode order items: {0}")]
    Items(#[from] serde_json::Error),

    #[error("expected delivery date out of range for lead time of {0} days")]
    DeliveryOutOfRange(i32),
}

/// Scan the active reorder rules of `tenant` and draft a purchase order for
/// every product at or below its minimum stock level.
pub async fn check_inventory_and_reorder(
    db: &DatabaseConnection,
    tenant: &Tenant,
    config: &AutopilotConfig,
) -> Result<ReorderSummary, AutopilotError> {
    check_inventory_and_reorder_at(db, tenant, config, Utc::now()).await
}

/// [`check_inventory_and_reorder`] with an explicit clock.
pub async fn check_inventory_and_reorder_at(
    db: &DatabaseConnection,
    tenant: &Tenant,
    config: &AutopilotConfig,
    now: DateTime<Utc>,
) -> Result<ReorderSummary, AutopilotError> {
    let rules = reorder_rule::Entity::find()
        .filter(reorder_rule::Column::UserId.eq(tenant.as_str()))
        .filter(reorder_rule::Column::IsActive.eq(true))
        .order_by_asc(reorder_rule::Column::CreatedAt)
        .all(db)
        .await?;

    let mut summary = ReorderSummary::default();

    for rule in &rules {
        match evaluate_rule(db, tenant, rule, &config.default_supplier_name, now).await {
            Ok(Some(order)) => {
                summary.orders_created += 1;
                info!(
                    tenant = %tenant,
                    rule_id = %rule.id,
                    order_number = %order.order_number,
                    "Drafted purchase order"
                );
            }
            Ok(None) => {}
            Err(e) => {
                summary.rules_failed += 1;
                error!(tenant = %tenant, rule_id = %rule.id, error = %e, "Reorder rule evaluation failed");
                let log = NewActionLog::failed(
                    ActionType::OrderCreated,
                    AutopilotModule::Inventory,
                    format!("Reorder check failed for product {}: {}", rule.product_id, e),
                )
                .with_metadata(json!({"rule_id": rule.id, "product_id": rule.product_id}));
                record_action_best_effort(db, tenant, log).await;
            }
        }
    }

    info!(
        tenant = %tenant,
        rules = rules.len(),
        orders_created = summary.orders_created,
        rules_failed = summary.rules_failed,
        "Reorder scan finished"
    );
    Ok(summary)
}

async fn evaluate_rule(
    db: &DatabaseConnection,
    tenant: &Tenant,
    rule: &reorder_rule::Model,
    supplier_name: &str,
    now: DateTime<Utc>,
) -> Result<Option<purchase_order::Model>, ReorderError> {
    let Some(product) = product::Entity::find_by_id(rule.product_id)
        .filter(product::Column::UserId.eq(tenant.as_str()))
        .one(db)
        .await?
    else {
        warn!(
            tenant = %tenant,
            rule_id = %rule.id,
            product_id = rule.product_id,
            "Reorder rule references a missing product"
        );
        return Ok(None);
    };

    if !needs_reorder(product.quantity, rule.min_stock_level) {
        return Ok(None);
    }

    let expected = expected_delivery(now.date_naive(), rule.lead_time_days)
        .ok_or(ReorderError::DeliveryOutOfRange(rule.lead_time_days))?;
    let items = vec![PurchaseOrderItem {
        product_id: product.id,
        product_name: product.name.clone(),
        quantity: rule.reorder_quantity,
    }];

    let txn = db.begin().await?;

    let order = purchase_order::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(tenant.as_str().to_owned()),
        order_number: Set(generate_order_number()),
        supplier_id: Set(rule.supplier_id.clone()),
        supplier_name: Set(supplier_name.to_owned()),
        status: Set(PurchaseOrderStatus::Draft),
        order_date: Set(now),
        expected_delivery: Set(Some(expected)),
        total_amount: Set(Decimal::ZERO),
        items: Set(serde_json::to_value(&items)?),
        created_by: Set(OrderOrigin::Autopilot),
        approved_by: Set(None),
        approval_required: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let log = NewActionLog::success(
        ActionType::OrderCreated,
        AutopilotModule::Inventory,
        format!(
            "Automatic purchase order {} created for {} (stock: {})",
            order.order_number, product.name, product.quantity
        ),
    )
    .with_metadata(json!({
        "order_id": order.id,
        "order_number": order.order_number,
        "product_id": product.id,
        "quantity": rule.reorder_quantity,
    }));
    record_action(&txn, tenant, log).await?;

    txn.commit().await?;
    Ok(Some(order))
}

/// Stock at or below the minimum triggers a reorder.
pub fn needs_reorder(quantity: i32, min_stock_level: i32) -> bool {
    quantity <= min_stock_level
}

/// Calendar date `lead_time_days` after `order_date`. `None` for negative or
/// out-of-range lead times.
pub fn expected_delivery(order_date: NaiveDate, lead_time_days: i32) -> Option<NaiveDate> {
    let days = u64::try_from(lead_time_days).ok()?;
    order_date.checked_add_days(Days::new(days))
}

/// `PO-` followed by a time-ordered UUID, unique without coordination.
pub fn generate_order_number() -> String {
    format!("PO-{}", Uuid::now_v7().simple().to_string().to_uppercase())
}
