use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(price_sync_routes())
        .merge(reorder_routes())
        .merge(promotion_routes())
        .merge(production_routes())
        .merge(action_log_routes())
        .merge(settings_routes())
}

fn price_sync_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::price_sync::list_price_sync_queue,
            handlers::price_sync::enqueue_price_change
        ))
        .routes(routes!(handlers::price_sync::process_queue))
}

fn reorder_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::reorder::list_reorder_rules,
            handlers::reorder::create_reorder_rule
        ))
        .routes(routes!(handlers::reorder::check_inventory))
        .routes(routes!(
            handlers::reorder::list_purchase_orders,
            handlers::reorder::create_purchase_order
        ))
}

fn promotion_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::promotions::list_promotions,
            handlers::promotions::create_promotion
        ))
        .routes(routes!(handlers::promotions::activate_expiring_soon))
}

fn production_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::production::list_production_recommendations,
        handlers::production::create_production_recommendation
    ))
}

fn action_log_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::action_log::list_action_logs))
}

fn settings_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::settings::get_settings))
        .routes(routes!(handlers::settings::update_settings))
}
