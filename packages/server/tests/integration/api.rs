use ::common::{ActionType, AutopilotModule};
use chrono::Duration;
use serde_json::json;

use autopilot_server::autopilot::action_log::{NewActionLog, record_action};
use autopilot_server::utils::jwt;

use crate::common::{TestApp, routes, tenant};

mod auth {
    use super::*;

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ACTION_LOGS).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");

        let res = app
            .post_without_token(routes::PRICE_SYNC_PROCESS, &json!({}))
            .await;
        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let app = TestApp::spawn().await;
        let forged = jwt::sign("shop-1", "not-the-secret", Duration::hours(1)).unwrap();

        let res = app.get_with_token(routes::ACTION_LOGS, &forged).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn blank_tenant_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.token_for("  ");

        let res = app.get_with_token(routes::ACTION_LOGS, &token).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}

mod action_logs {
    use super::*;

    #[tokio::test]
    async fn newest_first_with_limit() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        for i in 0..3 {
            record_action(
                &app.db,
                &tenant("shop-1"),
                NewActionLog::success(
                    ActionType::PriceSync,
                    AutopilotModule::Pricing,
                    format!("entry {i}"),
                ),
            )
            .await
            .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        record_action(
            &app.db,
            &tenant("shop-2"),
            NewActionLog::success(ActionType::PriceSync, AutopilotModule::Pricing, "other"),
        )
        .await
        .unwrap();

        let res = app
            .get_with_token(&format!("{}?limit=2", routes::ACTION_LOGS), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let logs = res.body.as_array().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0]["description"], "entry 2");
        assert_eq!(logs[1]["description"], "entry 1");

        let res = app.get_with_token(routes::ACTION_LOGS, &token).await;
        assert_eq!(res.body.as_array().unwrap().len(), 3);
    }
}

mod docs {
    use super::*;

    #[tokio::test]
    async fn scalar_is_served() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token("/scalar").await;
        assert_eq!(res.status, 200);
        assert!(res.text.contains("/api/v1/price-sync/queue"));
    }
}
