use ::common::{ActionStatus, ActionType, OrderOrigin, PurchaseOrderStatus};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use autopilot_server::autopilot::reorder::check_inventory_and_reorder_at;
use autopilot_server::entity::{action_log, purchase_order, reorder_rule};

use crate::common::{TestApp, routes, tenant};

async fn orders_of(app: &TestApp, tenant_id: &str) -> Vec<purchase_order::Model> {
    purchase_order::Entity::find()
        .filter(purchase_order::Column::UserId.eq(tenant_id))
        .all(&app.db)
        .await
        .unwrap()
}

mod scanning {
    use super::*;

    #[tokio::test]
    async fn stock_above_minimum_creates_nothing() {
        let app = TestApp::spawn().await;
        let flour = app.seed_product("shop-1", "Flour", 6, "3.00", None).await;
        app.seed_rule("shop-1", flour.id, 5, 20, 3, true).await;

        let summary =
            check_inventory_and_reorder_at(&app.db, &tenant("shop-1"), &app.autopilot, Utc::now())
                .await
                .unwrap();
        assert_eq!(summary.orders_created, 0);
        assert_eq!(summary.rules_failed, 0);
        assert!(orders_of(&app, "shop-1").await.is_empty());
        assert!(action_log::Entity::find().all(&app.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stock_at_minimum_drafts_one_order() {
        let app = TestApp::spawn().await;
        let flour = app.seed_product("shop-1", "Flour", 5, "3.00", None).await;
        app.seed_rule("shop-1", flour.id, 5, 20, 3, true).await;
        let order_time = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();

        let summary =
            check_inventory_and_reorder_at(&app.db, &tenant("shop-1"), &app.autopilot, order_time)
                .await
                .unwrap();
        assert_eq!(summary.orders_created, 1);

        let orders = orders_of(&app, "shop-1").await;
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert!(order.order_number.starts_with("PO-"));
        assert_eq!(order.status, PurchaseOrderStatus::Draft);
        assert!(order.approval_required);
        assert_eq!(order.created_by, OrderOrigin::Autopilot);
        assert_eq!(order.supplier_name, "Automatic Supplier");
        assert_eq!(order.supplier_id.as_deref(), Some("supplier-1"));
        assert_eq!(order.order_date, order_time);
        assert_eq!(
            order.expected_delivery,
            NaiveDate::from_ymd_opt(2024, 1, 13)
        );

        let items = order.items.as_array().expect("items is a list");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["product_id"], flour.id);
        assert_eq!(items[0]["product_name"], "Flour");
        assert_eq!(items[0]["quantity"], 20);

        let logs = action_log::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action_type, ActionType::OrderCreated);
        assert_eq!(logs[0].status, ActionStatus::Success);
        assert!(logs[0].description.contains(&order.order_number));
    }

    #[tokio::test]
    async fn each_breached_rule_gets_its_own_order() {
        let app = TestApp::spawn().await;
        let flour = app.seed_product("shop-1", "Flour", 0, "3.00", None).await;
        let sugar = app.seed_product("shop-1", "Sugar", 2, "2.00", None).await;
        let salt = app.seed_product("shop-1", "Salt", 50, "1.00", None).await;
        app.seed_rule("shop-1", flour.id, 5, 20, 3, true).await;
        app.seed_rule("shop-1", sugar.id, 2, 10, 0, true).await;
        app.seed_rule("shop-1", salt.id, 5, 10, 1, true).await;

        let summary =
            check_inventory_and_reorder_at(&app.db, &tenant("shop-1"), &app.autopilot, Utc::now())
                .await
                .unwrap();
        assert_eq!(summary.orders_created, 2);

        let orders = orders_of(&app, "shop-1").await;
        assert_eq!(orders.len(), 2);
        assert_ne!(orders[0].order_number, orders[1].order_number);
    }

    #[tokio::test]
    async fn no_active_rules_is_a_no_op() {
        let app = TestApp::spawn().await;
        let flour = app.seed_product("shop-1", "Flour", 0, "3.00", None).await;
        app.seed_rule("shop-1", flour.id, 5, 20, 3, false).await;

        let summary =
            check_inventory_and_reorder_at(&app.db, &tenant("shop-1"), &app.autopilot, Utc::now())
                .await
                .unwrap();
        assert_eq!(summary.orders_created, 0);
        assert_eq!(summary.rules_failed, 0);
        assert!(orders_of(&app, "shop-1").await.is_empty());
    }

    #[tokio::test]
    async fn missing_product_is_skipped() {
        let app = TestApp::spawn().await;
        app.seed_rule("shop-1", 9_999, 5, 20, 3, true).await;
        let theirs = app.seed_product("shop-2", "Flour", 0, "3.00", None).await;
        app.seed_rule("shop-1", theirs.id, 5, 20, 3, true).await;

        let summary =
            check_inventory_and_reorder_at(&app.db, &tenant("shop-1"), &app.autopilot, Utc::now())
                .await
                .unwrap();
        assert_eq!(summary.orders_created, 0);
        assert_eq!(summary.rules_failed, 0);
        assert!(orders_of(&app, "shop-1").await.is_empty());
        assert!(orders_of(&app, "shop-2").await.is_empty());
    }

    #[tokio::test]
    async fn rules_are_left_untouched() {
        let app = TestApp::spawn().await;
        let flour = app.seed_product("shop-1", "Flour", 1, "3.00", None).await;
        let rule = app.seed_rule("shop-1", flour.id, 5, 20, 3, true).await;

        check_inventory_and_reorder_at(&app.db, &tenant("shop-1"), &app.autopilot, Utc::now())
            .await
            .unwrap();

        let after = reorder_rule::Entity::find_by_id(rule.id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert!(after.is_active);
        assert_eq!(after.last_order_date, None);
        assert_eq!(after.min_stock_level, rule.min_stock_level);
        assert_eq!(after.reorder_quantity, rule.reorder_quantity);
        assert_eq!(after.lead_time_days, rule.lead_time_days);
    }

    #[tokio::test]
    async fn faulty_rule_does_not_stop_the_scan() {
        let app = TestApp::spawn().await;
        let flour = app.seed_product("shop-1", "Flour", 1, "3.00", None).await;
        let sugar = app.seed_product("shop-1", "Sugar", 2, "2.00", None).await;
        // A negative lead time has no delivery date.
        let faulty = app.seed_rule("shop-1", flour.id, 5, 20, -1, true).await;
        app.seed_rule("shop-1", sugar.id, 5, 10, 2, true).await;

        let summary =
            check_inventory_and_reorder_at(&app.db, &tenant("shop-1"), &app.autopilot, Utc::now())
                .await
                .unwrap();
        assert_eq!(summary.orders_created, 1);
        assert_eq!(summary.rules_failed, 1);

        let orders = orders_of(&app, "shop-1").await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items[0]["product_id"], sugar.id);

        let failed = action_log::Entity::find()
            .filter(action_log::Column::ActionType.eq(ActionType::OrderCreated))
            .filter(action_log::Column::Status.eq(ActionStatus::Failed))
            .all(&app.db)
            .await
            .unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].metadata["rule_id"], faulty.id.to_string());
        assert_eq!(failed[0].metadata["product_id"], flour.id);
    }
}

mod http {
    use super::*;

    #[tokio::test]
    async fn create_rule_then_check() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let flour = app.seed_product("shop-1", "Flour", 5, "3.00", None).await;

        let res = app
            .post_with_token(
                routes::REORDER_RULES,
                &json!({
                    "product_id": flour.id,
                    "min_stock_level": 5,
                    "reorder_quantity": 20,
                    "lead_time_days": 3,
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["is_active"], true);
        assert_eq!(res.body["reorder_quantity"], 20);

        let res = app.get_with_token(routes::REORDER_RULES, &token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 1);

        let res = app
            .get_with_token(&format!("{}?active=false", routes::REORDER_RULES), &token)
            .await;
        assert!(res.body.as_array().unwrap().is_empty());

        let res = app
            .post_with_token(routes::REORDER_CHECK, &json!({}), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["orders_created"], 1);
        assert_eq!(res.body["rules_failed"], 0);

        let res = app.get_with_token(routes::PURCHASE_ORDERS, &token).await;
        assert_eq!(res.status, 200);
        let orders = res.body.as_array().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["status"], "draft");
        assert_eq!(orders[0]["created_by"], "autopilot");
        assert_eq!(orders[0]["items"][0]["quantity"], 20);
    }

    #[tokio::test]
    async fn rejects_invalid_thresholds() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let flour = app.seed_product("shop-1", "Flour", 5, "3.00", None).await;

        for body in [
            json!({"product_id": flour.id, "min_stock_level": -1, "reorder_quantity": 20, "lead_time_days": 3}),
            json!({"product_id": flour.id, "min_stock_level": 5, "reorder_quantity": 0, "lead_time_days": 3}),
            json!({"product_id": flour.id, "min_stock_level": 5, "reorder_quantity": 20, "lead_time_days": -1}),
        ] {
            let res = app.post_with_token(routes::REORDER_RULES, &body, &token).await;
            assert_eq!(res.status, 400, "{}", res.text);
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }

        let res = app
            .post_with_token(
                routes::REORDER_RULES,
                &json!({"product_id": 9_999, "min_stock_level": 5, "reorder_quantity": 20, "lead_time_days": 3}),
                &token,
            )
            .await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn purchase_orders_are_tenant_scoped() {
        let app = TestApp::spawn().await;
        let flour = app.seed_product("shop-2", "Flour", 0, "3.00", None).await;
        app.seed_rule("shop-2", flour.id, 5, 20, 3, true).await;
        check_inventory_and_reorder_at(&app.db, &tenant("shop-2"), &app.autopilot, Utc::now())
            .await
            .unwrap();

        let res = app
            .get_with_token(routes::PURCHASE_ORDERS, &app.token_for("shop-1"))
            .await;
        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn manual_order_gets_generated_number() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let flour = app.seed_product("shop-1", "Flour", 50, "3.00", None).await;

        let res = app
            .post_with_token(
                routes::PURCHASE_ORDERS,
                &json!({
                    "supplier_name": "Mill & Co",
                    "total_amount": "120.00",
                    "expected_delivery": "2024-01-20",
                    "items": [{"product_id": flour.id, "product_name": "Flour", "quantity": 40}],
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["order_number"].as_str().unwrap().starts_with("PO-"));
        assert_eq!(res.body["created_by"], "manual");
        assert_eq!(res.body["status"], "draft");
        assert_eq!(res.body["approval_required"], true);
        assert_eq!(res.body["expected_delivery"], "2024-01-20");
        assert_eq!(res.body["items"][0]["quantity"], 40);

        let orders = orders_of(&app, "shop-1").await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].created_by, OrderOrigin::Manual);
    }

    #[tokio::test]
    async fn manual_order_needs_own_products_and_items() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let theirs = app.seed_product("shop-2", "Sugar", 50, "2.00", None).await;

        let res = app
            .post_with_token(
                routes::PURCHASE_ORDERS,
                &json!({
                    "supplier_name": "Mill & Co",
                    "items": [{"product_id": theirs.id, "product_name": "Sugar", "quantity": 10}],
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 404, "{}", res.text);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let res = app
            .post_with_token(
                routes::PURCHASE_ORDERS,
                &json!({"supplier_name": "Mill & Co", "items": []}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        assert!(orders_of(&app, "shop-1").await.is_empty());
    }
}
