use serde::Deserialize;

/// Autopilot job configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AutopilotConfig {
    /// Maximum queue entries claimed per price-sync run. Default: 10.
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
    /// Supplier name written on purchase orders drafted by the reorder scanner.
    /// Default: "Automatic Supplier".
    #[serde(default = "default_supplier_name")]
    pub default_supplier_name: String,
    #[serde(default)]
    pub promotions: PromotionConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

fn default_batch_size() -> u64 {
    10
}
fn default_supplier_name() -> String {
    "Automatic Supplier".into()
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            default_supplier_name: default_supplier_name(),
            promotions: PromotionConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

/// Expiring-soon promotion settings.
#[derive(Debug, Deserialize, Clone)]
pub struct PromotionConfig {
    /// Products expiring within this many days get a promotion. Default: 2.
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    /// Discount applied to expiring products. Default: 30.
    #[serde(default = "default_discount_percentage")]
    pub discount_percentage: i32,
    /// Channels the promotion is announced on. Default: ["email", "push"].
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
}

fn default_window_days() -> i64 {
    2
}
fn default_discount_percentage() -> i32 {
    30
}
fn default_channels() -> Vec<String> {
    vec!["email".into(), "push".into()]
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            discount_percentage: default_discount_percentage(),
            channels: default_channels(),
        }
    }
}

/// Background scheduler settings.
#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Whether the scheduler runs at all. Default: true.
    #[serde(default = "default_scheduler_enabled")]
    pub enabled: bool,
    /// Seconds between scheduler ticks. Default: 60.
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
    /// Queue entries claimed longer ago than this are returned to pending. Default: 300.
    #[serde(default = "default_claim_timeout_secs")]
    pub claim_timeout_secs: u64,
}

fn default_scheduler_enabled() -> bool {
    true
}
fn default_tick_interval_secs() -> u64 {
    60
}
fn default_claim_timeout_secs() -> u64 {
    300
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_scheduler_enabled(),
            tick_interval_secs: default_tick_interval_secs(),
            claim_timeout_secs: default_claim_timeout_secs(),
        }
    }
}
