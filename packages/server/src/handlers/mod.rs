pub mod action_log;
pub mod price_sync;
pub mod production;
pub mod promotions;
pub mod reorder;
pub mod settings;

const DEFAULT_LIST_LIMIT: u64 = 50;
const MAX_LIST_LIMIT: u64 = 200;

/// Resolve an optional `limit` query parameter to 1..=200, default 50.
fn list_limit(limit: Option<u64>) -> u64 {
    limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}
