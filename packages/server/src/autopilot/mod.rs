//! The autopilot jobs and the data they manage.
//!
//! Every operation takes a [`Tenant`] and touches only that tenant's rows.

pub mod action_log;
mod error;
pub mod price_sync;
pub mod production;
pub mod promotions;
pub mod purchasing;
pub mod reorder;
pub mod scheduler;
pub mod settings;
mod tenant;

pub use error::AutopilotError;
pub use price_sync::{PriceSyncSummary, process_price_sync_queue};
pub use promotions::{PromotionSummary, activate_expiring_soon_promotions};
pub use reorder::{ReorderSummary, check_inventory_and_reorder};
pub use tenant::Tenant;
