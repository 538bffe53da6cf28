use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, TimeDelta, Utc};
use common::{AutopilotConfig, AutopilotModule};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, error, info, warn};

use crate::entity::autopilot_setting;
use crate::queue::price_sync_queue;

use super::price_sync::process_price_sync_queue;
use super::promotions::activate_expiring_soon_promotions_at;
use super::reorder::check_inventory_and_reorder_at;
use super::settings::is_due;
use super::{AutopilotError, Tenant};

/// What one scheduler tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub released_claims: u64,
    pub modules_run: u64,
    pub modules_failed: u64,
}

/// Run the autopilot scheduler as a background task.
pub async fn run_autopilot_scheduler(db: DatabaseConnection, config: AutopilotConfig) {
    let tick = Duration::from_secs(config.scheduler.tick_interval_secs.max(1));

    info!(
        tick_interval_secs = config.scheduler.tick_interval_secs,
        claim_timeout_secs = config.scheduler.claim_timeout_secs,
        "Starting autopilot scheduler"
    );

    let mut interval = tokio::time::interval(tick);

    loop {
        interval.tick().await;

        if let Err(e) = run_scheduler_tick(&db, &config, Utc::now()).await {
            error!(error = %e, "Autopilot scheduler tick failed");
        }
    }
}

/// Release stale queue claims, then run every active module that is due.
pub async fn run_scheduler_tick(
    db: &DatabaseConnection,
    config: &AutopilotConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<TickReport> {
    let mut report = TickReport::default();

    let claim_timeout = i64::try_from(config.scheduler.claim_timeout_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .context("claim timeout out of range")?;
    report.released_claims = price_sync_queue(db)
        .release_stale_claims(now - claim_timeout)
        .await
        .context("failed to release stale queue claims")?;
    if report.released_claims > 0 {
        warn!(
            count = report.released_claims,
            "Returned stale price sync claims to pending"
        );
    }

    let settings = autopilot_setting::Entity::find()
        .filter(autopilot_setting::Column::IsActive.eq(true))
        .all(db)
        .await
        .context("failed to load autopilot settings")?;

    for setting in settings {
        if !is_due(setting.last_execution, setting.execution_frequency, now) {
            continue;
        }

        let tenant = match Tenant::new(setting.user_id.clone()) {
            Ok(tenant) => tenant,
            Err(_) => {
                warn!(setting_id = %setting.id, "Skipping autopilot setting without tenant");
                continue;
            }
        };

        match run_module(db, config, &tenant, setting.module_name, now).await {
            Ok(()) => report.modules_run += 1,
            Err(e) => {
                report.modules_failed += 1;
                error!(
                    tenant = %tenant,
                    module = %setting.module_name,
                    error = %e,
                    "Autopilot module run failed"
                );
            }
        }

        // Stamped on failure too, so a broken module waits for its next slot.
        if let Err(e) = autopilot_setting::Entity::update_many()
            .col_expr(
                autopilot_setting::Column::LastExecution,
                Expr::value(Some(now)),
            )
            .filter(autopilot_setting::Column::Id.eq(setting.id))
            .exec(db)
            .await
        {
            error!(setting_id = %setting.id, error = %e, "Failed to stamp last execution");
        }
    }

    Ok(report)
}

async fn run_module(
    db: &DatabaseConnection,
    config: &AutopilotConfig,
    tenant: &Tenant,
    module: AutopilotModule,
    now: DateTime<Utc>,
) -> Result<(), AutopilotError> {
    match module {
        AutopilotModule::Pricing => {
            process_price_sync_queue(db, tenant, config.batch_size).await?;
        }
        AutopilotModule::Inventory => {
            check_inventory_and_reorder_at(db, tenant, config, now).await?;
        }
        AutopilotModule::Promotions => {
            activate_expiring_soon_promotions_at(db, tenant, &config.promotions, now).await?;
        }
        AutopilotModule::Production => {
            debug!(tenant = %tenant, "Production module has no automated job");
        }
    }
    Ok(())
}
