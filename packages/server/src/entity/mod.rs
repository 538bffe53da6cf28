pub mod action_log;
pub mod autopilot_setting;
pub mod price_history;
pub mod price_sync_queue;
pub mod product;
pub mod production_recommendation;
pub mod promotion;
pub mod purchase_order;
pub mod reorder_rule;
