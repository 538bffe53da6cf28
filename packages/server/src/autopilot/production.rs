use chrono::{NaiveDate, Utc};
use common::{ActionType, AutopilotModule, RecommendationStatus};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::entity::production_recommendation;

use super::action_log::{NewActionLog, record_action};
use super::purchasing::owned_product;
use super::{AutopilotError, Tenant};

/// A production recommendation to record.
#[derive(Debug, Clone)]
pub struct NewProductionRecommendation {
    pub product_id: i32,
    pub date: NaiveDate,
    pub recommended_quantity: i32,
    pub current_planned_quantity: i32,
    pub confidence_score: Decimal,
    pub factors: serde_json::Value,
    pub status: RecommendationStatus,
}

impl NewProductionRecommendation {
    pub fn validate(&self) -> Result<(), AutopilotError> {
        if self.recommended_quantity < 0 {
            return Err(AutopilotError::Validation(
                "recommended_quantity must not be negative".into(),
            ));
        }
        if self.current_planned_quantity < 0 {
            return Err(AutopilotError::Validation(
                "current_planned_quantity must not be negative".into(),
            ));
        }
        if self.confidence_score < Decimal::ZERO || self.confidence_score > Decimal::ONE {
            return Err(AutopilotError::Validation(
                "confidence_score must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

/// Record a recommendation for one of the tenant's products.
///
/// A recommendation created as `auto_applied` is stamped `applied_at` and
/// logged as a production adjustment in the same transaction.
pub async fn create_production_recommendation(
    db: &DatabaseConnection,
    tenant: &Tenant,
    rec: NewProductionRecommendation,
) -> Result<production_recommendation::Model, AutopilotError> {
    rec.validate()?;
    let product = owned_product(db, tenant, rec.product_id).await?;

    let now = Utc::now();
    let txn = db.begin().await?;

    let model = production_recommendation::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(tenant.as_str().to_owned()),
        product_id: Set(rec.product_id),
        date: Set(rec.date),
        recommended_quantity: Set(rec.recommended_quantity),
        current_planned_quantity: Set(rec.current_planned_quantity),
        confidence_score: Set(rec.confidence_score),
        factors: Set(rec.factors),
        status: Set(rec.status),
        created_at: Set(now),
        applied_at: Set(rec.status.is_applied().then_some(now)),
    }
    .insert(&txn)
    .await?;

    if model.status == RecommendationStatus::AutoApplied {
        let log = NewActionLog::success(
            ActionType::ProductionAdjusted,
            AutopilotModule::Production,
            adjustment_description(
                &product.name,
                model.date,
                model.current_planned_quantity,
                model.recommended_quantity,
            ),
        )
        .with_metadata(json!({
            "recommendation_id": model.id,
            "product_id": model.product_id,
            "date": model.date,
            "recommended_quantity": model.recommended_quantity,
        }));
        record_action(&txn, tenant, log).await?;
    }

    txn.commit().await?;

    info!(
        tenant = %tenant,
        recommendation_id = %model.id,
        product_id = model.product_id,
        status = %model.status,
        "Recorded production recommendation"
    );
    Ok(model)
}

/// Recommendations of `tenant`, latest production day first.
pub async fn list_production_recommendations(
    db: &DatabaseConnection,
    tenant: &Tenant,
    limit: u64,
) -> Result<Vec<production_recommendation::Model>, DbErr> {
    production_recommendation::Entity::find()
        .filter(production_recommendation::Column::UserId.eq(tenant.as_str()))
        .order_by_desc(production_recommendation::Column::Date)
        .order_by_desc(production_recommendation::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
}

fn adjustment_description(product_name: &str, date: NaiveDate, from: i32, to: i32) -> String {
    format!("Production of {product_name} on {date} adjusted from {from} to {to}")
}
