use chrono::{DateTime, Utc};
use common::{AutopilotModule, ExecutionFrequency};
use serde::{Deserialize, Serialize};

use crate::autopilot::settings::{ModuleSettings, SettingsPatch};

#[derive(Serialize, utoipa::ToSchema)]
pub struct ModuleSettingsResponse {
    pub module_name: AutopilotModule,
    pub is_active: bool,
    pub execution_frequency: ExecutionFrequency,
    pub last_execution: Option<DateTime<Utc>>,
    pub config: serde_json::Value,
    /// False when the module has never been configured and defaults are shown.
    pub persisted: bool,
}

impl From<ModuleSettings> for ModuleSettingsResponse {
    fn from(s: ModuleSettings) -> Self {
        Self {
            module_name: s.module_name,
            is_active: s.is_active,
            execution_frequency: s.execution_frequency,
            last_execution: s.last_execution,
            config: s.config,
            persisted: s.persisted,
        }
    }
}

/// Partial settings update; omitted fields keep their value.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateSettingsRequest {
    pub is_active: Option<bool>,
    pub execution_frequency: Option<ExecutionFrequency>,
    pub config: Option<serde_json::Value>,
}

impl From<UpdateSettingsRequest> for SettingsPatch {
    fn from(r: UpdateSettingsRequest) -> Self {
        Self {
            is_active: r.is_active,
            execution_frequency: r.execution_frequency,
            config: r.config,
        }
    }
}
