use ::common::{AutopilotModule, ExecutionFrequency, SyncStatus};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::json;
use uuid::Uuid;

use autopilot_server::autopilot::scheduler::run_scheduler_tick;
use autopilot_server::entity::{autopilot_setting, price_sync_queue};

use crate::common::{TestApp, routes};

async fn seed_setting(
    app: &TestApp,
    tenant: &str,
    module: AutopilotModule,
    is_active: bool,
    frequency: ExecutionFrequency,
    last_execution: Option<chrono::DateTime<Utc>>,
) -> autopilot_setting::Model {
    let now = Utc::now();
    autopilot_setting::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(tenant.to_string()),
        module_name: Set(module),
        is_active: Set(is_active),
        execution_frequency: Set(frequency),
        last_execution: Set(last_execution),
        config: Set(json!({})),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&app.db)
    .await
    .expect("Failed to seed setting")
}

mod api {
    use super::*;

    #[tokio::test]
    async fn unconfigured_modules_report_defaults() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");

        let res = app.get_with_token(routes::SETTINGS, &token).await;
        assert_eq!(res.status, 200, "{}", res.text);
        let settings = res.body.as_array().unwrap();
        assert_eq!(settings.len(), 4);
        for setting in settings {
            assert_eq!(setting["is_active"], false);
            assert_eq!(setting["persisted"], false);
            assert_eq!(setting["execution_frequency"], "hourly");
        }
    }

    #[tokio::test]
    async fn put_creates_then_patches() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");

        let res = app
            .put_with_token(
                &routes::module_settings("pricing"),
                &json!({"is_active": true, "execution_frequency": "realtime"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["module_name"], "pricing");
        assert_eq!(res.body["is_active"], true);
        assert_eq!(res.body["persisted"], true);

        let res = app
            .put_with_token(
                &routes::module_settings("pricing"),
                &json!({"execution_frequency": "daily"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["is_active"], true, "untouched field keeps its value");
        assert_eq!(res.body["execution_frequency"], "daily");

        let stored = autopilot_setting::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(stored.len(), 1);

        let res = app.get_with_token(routes::SETTINGS, &token).await;
        let pricing = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["module_name"] == "pricing")
            .cloned()
            .unwrap();
        assert_eq!(pricing["persisted"], true);
        assert_eq!(pricing["execution_frequency"], "daily");
    }

    #[tokio::test]
    async fn unknown_module_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");

        let res = app
            .put_with_token(
                &routes::module_settings("marketing"),
                &json!({"is_active": true}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["message"].as_str().unwrap().contains("pricing"));
    }
}

mod scheduler {
    use super::*;

    #[tokio::test]
    async fn runs_due_modules_and_stamps_them() {
        let app = TestApp::spawn().await;
        let bread = app.seed_product("shop-1", "Bread", 12, "10.00", None).await;
        app.seed_queue_entry("shop-1", bread.id, "10.00", "9.00", Utc::now())
            .await;
        let pricing = seed_setting(
            &app,
            "shop-1",
            AutopilotModule::Pricing,
            true,
            ExecutionFrequency::Realtime,
            None,
        )
        .await;

        let now = Utc::now();
        let report = run_scheduler_tick(&app.db, &app.autopilot, now)
            .await
            .unwrap();
        assert_eq!(report.modules_run, 1);
        assert_eq!(report.modules_failed, 0);

        let entries = price_sync_queue::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(entries[0].sync_status, SyncStatus::Completed);

        let stamped = autopilot_setting::Entity::find_by_id(pricing.id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        let last = stamped.last_execution.expect("last execution stamped");
        assert!((last - now).num_milliseconds().abs() < 1000);
    }

    #[tokio::test]
    async fn skips_inactive_and_not_yet_due_modules() {
        let app = TestApp::spawn().await;
        let now = Utc::now();
        seed_setting(
            &app,
            "shop-1",
            AutopilotModule::Inventory,
            false,
            ExecutionFrequency::Realtime,
            None,
        )
        .await;
        seed_setting(
            &app,
            "shop-1",
            AutopilotModule::Promotions,
            true,
            ExecutionFrequency::Hourly,
            Some(now - Duration::minutes(10)),
        )
        .await;
        seed_setting(
            &app,
            "shop-1",
            AutopilotModule::Production,
            true,
            ExecutionFrequency::Daily,
            Some(now - Duration::hours(25)),
        )
        .await;

        let report = run_scheduler_tick(&app.db, &app.autopilot, now)
            .await
            .unwrap();
        assert_eq!(report.modules_run, 1, "only the overdue production module runs");
    }

    #[tokio::test]
    async fn releases_stale_claims() {
        let app = TestApp::spawn().await;
        let bread = app.seed_product("shop-1", "Bread", 12, "10.00", None).await;
        let entry = app
            .seed_queue_entry("shop-1", bread.id, "10.00", "9.00", Utc::now())
            .await;

        let mut stuck: price_sync_queue::ActiveModel = entry.into();
        stuck.sync_status = Set(SyncStatus::Syncing);
        stuck.claimed_at = Set(Some(Utc::now() - Duration::hours(1)));
        stuck.update(&app.db).await.unwrap();

        let report = run_scheduler_tick(&app.db, &app.autopilot, Utc::now())
            .await
            .unwrap();
        assert_eq!(report.released_claims, 1);

        let entries = price_sync_queue::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(entries[0].sync_status, SyncStatus::Pending);
    }
}
