use ::common::{ActionStatus, ActionType, AutopilotModule, RecommendationStatus};
use sea_orm::EntityTrait;
use serde_json::json;

use autopilot_server::entity::{action_log, production_recommendation};

use crate::common::{TestApp, routes};

mod recommendations {
    use super::*;

    #[tokio::test]
    async fn pending_recommendation_is_not_applied() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let baguette = app.seed_product("shop-1", "Baguette", 30, "1.50", None).await;

        let res = app
            .post_with_token(
                routes::PRODUCTION_RECOMMENDATIONS,
                &json!({
                    "product_id": baguette.id,
                    "date": "2024-01-10",
                    "recommended_quantity": 40,
                    "current_planned_quantity": 30,
                    "confidence_score": "0.85",
                    "factors": {"weekday": "saturday"},
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["status"], "pending");
        assert_eq!(res.body["date"], "2024-01-10");
        assert_eq!(res.body["factors"]["weekday"], "saturday");
        assert!(res.body["applied_at"].is_null());

        let logs = action_log::Entity::find().all(&app.db).await.unwrap();
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn auto_applied_recommendation_logs_adjustment() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let baguette = app.seed_product("shop-1", "Baguette", 30, "1.50", None).await;

        let res = app
            .post_with_token(
                routes::PRODUCTION_RECOMMENDATIONS,
                &json!({
                    "product_id": baguette.id,
                    "date": "2024-01-10",
                    "recommended_quantity": 40,
                    "current_planned_quantity": 30,
                    "confidence_score": "0.9",
                    "status": "auto_applied",
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["applied_at"].is_string());

        let stored = production_recommendation::Entity::find()
            .all(&app.db)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, RecommendationStatus::AutoApplied);
        assert_eq!(stored[0].factors, json!({}));

        let logs = action_log::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action_type, ActionType::ProductionAdjusted);
        assert_eq!(logs[0].module, AutopilotModule::Production);
        assert_eq!(logs[0].status, ActionStatus::Success);
        assert_eq!(
            logs[0].description,
            "Production of Baguette on 2024-01-10 adjusted from 30 to 40"
        );
        assert_eq!(logs[0].metadata["recommendation_id"], stored[0].id.to_string());
    }

    #[tokio::test]
    async fn latest_day_first_and_tenant_scoped() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let baguette = app.seed_product("shop-1", "Baguette", 30, "1.50", None).await;

        for date in ["2024-01-09", "2024-01-11", "2024-01-10"] {
            let res = app
                .post_with_token(
                    routes::PRODUCTION_RECOMMENDATIONS,
                    &json!({
                        "product_id": baguette.id,
                        "date": date,
                        "recommended_quantity": 40,
                        "confidence_score": "0.5",
                    }),
                    &token,
                )
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let res = app
            .get_with_token(
                &format!("{}?limit=2", routes::PRODUCTION_RECOMMENDATIONS),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let data = res.body.as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["date"], "2024-01-11");
        assert_eq!(data[1]["date"], "2024-01-10");
        assert_eq!(data[0]["current_planned_quantity"], 0);

        let res = app
            .get_with_token(routes::PRODUCTION_RECOMMENDATIONS, &app.token_for("shop-2"))
            .await;
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_bad_input_and_foreign_products() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let mine = app.seed_product("shop-1", "Baguette", 30, "1.50", None).await;
        let theirs = app.seed_product("shop-2", "Cake", 3, "20.00", None).await;

        for body in [
            json!({"product_id": mine.id, "date": "2024-01-10", "recommended_quantity": -1, "confidence_score": "0.5"}),
            json!({"product_id": mine.id, "date": "2024-01-10", "recommended_quantity": 10, "confidence_score": "1.5"}),
            json!({"product_id": mine.id, "date": "2024-01-10", "recommended_quantity": 10, "confidence_score": "0.5", "status": "maybe"}),
        ] {
            let res = app
                .post_with_token(routes::PRODUCTION_RECOMMENDATIONS, &body, &token)
                .await;
            assert_eq!(res.status, 400, "{}", res.text);
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }

        let res = app
            .post_with_token(
                routes::PRODUCTION_RECOMMENDATIONS,
                &json!({"product_id": theirs.id, "date": "2024-01-10", "recommended_quantity": 10, "confidence_score": "0.5"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 404);

        let res = app
            .post_without_token(
                routes::PRODUCTION_RECOMMENDATIONS,
                &json!({"product_id": mine.id, "date": "2024-01-10", "recommended_quantity": 10, "confidence_score": "0.5"}),
            )
            .await;
        assert_eq!(res.status, 401);

        let stored = production_recommendation::Entity::find()
            .all(&app.db)
            .await
            .unwrap();
        assert!(stored.is_empty());
    }
}
