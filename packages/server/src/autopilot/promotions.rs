use chrono::{DateTime, TimeDelta, Utc};
use common::{
    ActionType, AutopilotModule, OrderOrigin, PromotionConfig, PromotionStatus, PromotionType,
    TargetAudience,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::entity::{product, promotion};

use super::action_log::{NewActionLog, record_action_best_effort};
use super::purchasing::owned_product;
use super::{AutopilotError, Tenant};

/// Outcome of one expiring-soon run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionSummary {
    pub created: u64,
    /// Names of the products that received a promotion.
    pub products: Vec<String>,
}

/// Create an expiration-alert promotion for every product of `tenant` that
/// expires within the configured window and has no active one yet.
pub async fn activate_expiring_soon_promotions(
    db: &DatabaseConnection,
    tenant: &Tenant,
    config: &PromotionConfig,
) -> Result<PromotionSummary, AutopilotError> {
    activate_expiring_soon_promotions_at(db, tenant, config, Utc::now()).await
}

/// [`activate_expiring_soon_promotions`] with an explicit clock.
pub async fn activate_expiring_soon_promotions_at(
    db: &DatabaseConnection,
    tenant: &Tenant,
    config: &PromotionConfig,
    now: DateTime<Utc>,
) -> Result<PromotionSummary, AutopilotError> {
    let window = TimeDelta::try_days(config.window_days)
        .filter(|w| *w >= TimeDelta::zero())
        .ok_or_else(|| {
            AutopilotError::Validation(format!(
                "invalid promotion window of {} days",
                config.window_days
            ))
        })?;
    let window_end = now + window;

    let products = product::Entity::find()
        .filter(product::Column::UserId.eq(tenant.as_str()))
        .filter(product::Column::ExpirationDate.gte(now))
        .filter(product::Column::ExpirationDate.lte(window_end))
        .order_by_asc(product::Column::ExpirationDate)
        .all(db)
        .await?;

    let mut summary = PromotionSummary::default();

    for product in &products {
        match promote_product(db, tenant, product, config, now).await {
            Ok(true) => {
                summary.created += 1;
                summary.products.push(product.name.clone());
            }
            Ok(false) => {}
            Err(e) => {
                error!(
                    tenant = %tenant,
                    product_id = product.id,
                    error = %e,
                    "Failed to create expiring-soon promotion"
                );
            }
        }
    }

    if summary.created > 0 {
        let log = NewActionLog::success(
            ActionType::PromotionSent,
            AutopilotModule::Promotions,
            format!(
                "{} expiring-soon promotions created automatically",
                summary.created
            ),
        )
        .with_metadata(json!({ "products": summary.products }));
        record_action_best_effort(db, tenant, log).await;
    }

    info!(
        tenant = %tenant,
        candidates = products.len(),
        created = summary.created,
        "Expiring-soon promotion run finished"
    );
    Ok(summary)
}

/// Returns `false` when the product already has an active expiration alert.
async fn promote_product(
    db: &DatabaseConnection,
    tenant: &Tenant,
    product: &product::Model,
    config: &PromotionConfig,
    now: DateTime<Utc>,
) -> Result<bool, DbErr> {
    let Some(expiration) = product.expiration_date else {
        return Ok(false);
    };

    let active = promotion::Entity::find()
        .filter(promotion::Column::UserId.eq(tenant.as_str()))
        .filter(promotion::Column::ProductId.eq(product.id))
        .filter(promotion::Column::PromotionType.eq(PromotionType::ExpirationAlert))
        .filter(promotion::Column::Status.eq(PromotionStatus::Active))
        .count(db)
        .await?;
    if active > 0 {
        return Ok(false);
    }

    promotion::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(tenant.as_str().to_owned()),
        product_id: Set(Some(product.id)),
        promotion_type: Set(PromotionType::ExpirationAlert),
        discount_percentage: Set(config.discount_percentage),
        message: Set(promotion_message(&product.name, config.discount_percentage)),
        target_audience: Set(TargetAudience::All),
        channels: Set(json!(config.channels)),
        start_time: Set(now),
        end_time: Set(expiration),
        status: Set(PromotionStatus::Active),
        sent_count: Set(0),
        conversion_count: Set(0),
        created_by: Set(OrderOrigin::Autopilot),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    Ok(true)
}

fn promotion_message(product_name: &str, discount_percentage: i32) -> String {
    format!("Last chance! {product_name} at {discount_percentage}% off. Expires soon.")
}

/// A promotion entered by hand.
#[derive(Debug, Clone)]
pub struct NewPromotion {
    pub product_id: Option<i32>,
    pub promotion_type: PromotionType,
    pub discount_percentage: i32,
    pub message: String,
    pub target_audience: TargetAudience,
    pub channels: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: PromotionStatus,
}

impl NewPromotion {
    pub fn validate(&self) -> Result<(), AutopilotError> {
        if !(1..=100).contains(&self.discount_percentage) {
            return Err(AutopilotError::Validation(
                "discount_percentage must be between 1 and 100".into(),
            ));
        }
        if self.message.trim().is_empty() {
            return Err(AutopilotError::Validation("message must not be empty".into()));
        }
        if self.end_time <= self.start_time {
            return Err(AutopilotError::Validation(
                "end_time must be after start_time".into(),
            ));
        }
        Ok(())
    }
}

/// Create a manual promotion, optionally tied to one of the tenant's products.
pub async fn create_promotion(
    db: &DatabaseConnection,
    tenant: &Tenant,
    draft: NewPromotion,
) -> Result<promotion::Model, AutopilotError> {
    draft.validate()?;
    if let Some(product_id) = draft.product_id {
        owned_product(db, tenant, product_id).await?;
    }

    let now = Utc::now();
    let model = promotion::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(tenant.as_str().to_owned()),
        product_id: Set(draft.product_id),
        promotion_type: Set(draft.promotion_type),
        discount_percentage: Set(draft.discount_percentage),
        message: Set(draft.message),
        target_audience: Set(draft.target_audience),
        channels: Set(json!(draft.channels)),
        start_time: Set(draft.start_time),
        end_time: Set(draft.end_time),
        status: Set(draft.status),
        sent_count: Set(0),
        conversion_count: Set(0),
        created_by: Set(OrderOrigin::Manual),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(tenant = %tenant, promotion_id = %model.id, "Created promotion");
    Ok(model)
}

/// Promotions of `tenant`, newest first.
pub async fn list_promotions(
    db: &DatabaseConnection,
    tenant: &Tenant,
    limit: u64,
) -> Result<Vec<promotion::Model>, DbErr> {
    promotion::Entity::find()
        .filter(promotion::Column::UserId.eq(tenant.as_str()))
        .order_by_desc(promotion::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
}
