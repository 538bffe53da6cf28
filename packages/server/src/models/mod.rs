pub mod action_log;
pub mod price_sync;
pub mod production;
pub mod promotions;
pub mod reorder;
pub mod settings;
