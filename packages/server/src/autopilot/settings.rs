use chrono::{DateTime, Utc};
use common::{AutopilotModule, ExecutionFrequency};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entity::autopilot_setting;

use super::Tenant;

/// Effective settings of one module. Modules without a stored row report
/// their defaults with `persisted = false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSettings {
    pub module_name: AutopilotModule,
    pub is_active: bool,
    pub execution_frequency: ExecutionFrequency,
    pub last_execution: Option<DateTime<Utc>>,
    pub config: serde_json::Value,
    pub persisted: bool,
}

impl ModuleSettings {
    fn defaults(module_name: AutopilotModule) -> Self {
        Self {
            module_name,
            is_active: false,
            execution_frequency: ExecutionFrequency::default(),
            last_execution: None,
            config: serde_json::json!({}),
            persisted: false,
        }
    }
}

impl From<autopilot_setting::Model> for ModuleSettings {
    fn from(m: autopilot_setting::Model) -> Self {
        Self {
            module_name: m.module_name,
            is_active: m.is_active,
            execution_frequency: m.execution_frequency,
            last_execution: m.last_execution,
            config: m.config,
            persisted: true,
        }
    }
}

/// Partial update of a module's settings. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub is_active: Option<bool>,
    pub execution_frequency: Option<ExecutionFrequency>,
    pub config: Option<serde_json::Value>,
}

/// Settings of every module for `tenant`, in [`AutopilotModule::ALL`] order.
pub async fn get_settings(
    db: &DatabaseConnection,
    tenant: &Tenant,
) -> Result<Vec<ModuleSettings>, DbErr> {
    let stored = autopilot_setting::Entity::find()
        .filter(autopilot_setting::Column::UserId.eq(tenant.as_str()))
        .all(db)
        .await?;

    let settings = AutopilotModule::ALL
        .iter()
        .map(|module| {
            stored
                .iter()
                .find(|s| s.module_name == *module)
                .cloned()
                .map(ModuleSettings::from)
                .unwrap_or_else(|| ModuleSettings::defaults(*module))
        })
        .collect();

    Ok(settings)
}

/// Apply `patch` to the settings of `module`, creating the row if needed.
pub async fn update_settings(
    db: &DatabaseConnection,
    tenant: &Tenant,
    module: AutopilotModule,
    patch: SettingsPatch,
) -> Result<autopilot_setting::Model, DbErr> {
    let now = Utc::now();
    let existing = autopilot_setting::Entity::find()
        .filter(autopilot_setting::Column::UserId.eq(tenant.as_str()))
        .filter(autopilot_setting::Column::ModuleName.eq(module))
        .one(db)
        .await?;

    let model = match existing {
        Some(model) => {
            let mut active: autopilot_setting::ActiveModel = model.into();
            if let Some(is_active) = patch.is_active {
                active.is_active = Set(is_active);
            }
            if let Some(frequency) = patch.execution_frequency {
                active.execution_frequency = Set(frequency);
            }
            if let Some(config) = patch.config {
                active.config = Set(config);
            }
            active.updated_at = Set(now);
            active.update(db).await?
        }
        None => {
            let defaults = ModuleSettings::defaults(module);
            autopilot_setting::ActiveModel {
                id: Set(Uuid::now_v7()),
                user_id: Set(tenant.as_str().to_owned()),
                module_name: Set(module),
                is_active: Set(patch.is_active.unwrap_or(defaults.is_active)),
                execution_frequency: Set(patch
                    .execution_frequency
                    .unwrap_or(defaults.execution_frequency)),
                last_execution: Set(None),
                config: Set(patch.config.unwrap_or(defaults.config)),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(db)
            .await?
        }
    };

    info!(
        tenant = %tenant,
        module = %module,
        is_active = model.is_active,
        frequency = %model.execution_frequency,
        "Updated autopilot settings"
    );
    Ok(model)
}

/// Whether a module last run at `last_execution` is due again at `now`.
pub fn is_due(
    last_execution: Option<DateTime<Utc>>,
    frequency: ExecutionFrequency,
    now: DateTime<Utc>,
) -> bool {
    match last_execution {
        None => true,
        Some(last) => (now - last).num_seconds() >= frequency.min_interval_secs(),
    }
}
