use ::common::{ActionType, OrderOrigin, PromotionStatus, PromotionType, TargetAudience};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use autopilot_server::autopilot::promotions::activate_expiring_soon_promotions_at;
use autopilot_server::entity::{action_log, promotion};

use crate::common::{TestApp, routes, tenant};

mod expiring_soon {
    use super::*;

    #[tokio::test]
    async fn promotes_products_inside_the_window() {
        let app = TestApp::spawn().await;
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let milk = app
            .seed_product("shop-1", "Milk", 10, "1.50", Some(now + Duration::days(1)))
            .await;
        app.seed_product("shop-1", "Cheese", 4, "6.00", Some(now + Duration::days(5)))
            .await;
        app.seed_product("shop-1", "Yogurt", 4, "0.80", Some(now - Duration::hours(1)))
            .await;
        app.seed_product("shop-1", "Salt", 40, "0.50", None).await;

        let summary = activate_expiring_soon_promotions_at(
            &app.db,
            &tenant("shop-1"),
            &app.autopilot.promotions,
            now,
        )
        .await
        .unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(summary.products, vec!["Milk".to_string()]);

        let promotions = promotion::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(promotions.len(), 1);
        let promo = &promotions[0];
        assert_eq!(promo.product_id, Some(milk.id));
        assert_eq!(promo.promotion_type, PromotionType::ExpirationAlert);
        assert_eq!(promo.discount_percentage, 30);
        assert_eq!(promo.target_audience, TargetAudience::All);
        assert_eq!(promo.channels, json!(["email", "push"]));
        assert_eq!(promo.status, PromotionStatus::Active);
        assert_eq!(promo.created_by, OrderOrigin::Autopilot);
        assert_eq!(promo.start_time, now);
        assert_eq!(promo.end_time, now + Duration::days(1));
        assert!(promo.message.contains("Milk"));

        let logs = action_log::Entity::find()
            .filter(action_log::Column::ActionType.eq(ActionType::PromotionSent))
            .all(&app.db)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].metadata["products"], json!(["Milk"]));
    }

    #[tokio::test]
    async fn second_run_does_not_duplicate() {
        let app = TestApp::spawn().await;
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        app.seed_product("shop-1", "Milk", 10, "1.50", Some(now + Duration::days(1)))
            .await;

        let config = &app.autopilot.promotions;
        let first = activate_expiring_soon_promotions_at(&app.db, &tenant("shop-1"), config, now)
            .await
            .unwrap();
        assert_eq!(first.created, 1);

        let later = now + Duration::hours(2);
        let second = activate_expiring_soon_promotions_at(&app.db, &tenant("shop-1"), config, later)
            .await
            .unwrap();
        assert_eq!(second.created, 0);
        assert!(second.products.is_empty());

        assert_eq!(promotion::Entity::find().all(&app.db).await.unwrap().len(), 1);
        let logs = action_log::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(logs.len(), 1, "no log when nothing was created");
    }

    #[tokio::test]
    async fn other_tenants_products_are_ignored() {
        let app = TestApp::spawn().await;
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        app.seed_product("shop-2", "Milk", 10, "1.50", Some(now + Duration::days(1)))
            .await;

        let summary = activate_expiring_soon_promotions_at(
            &app.db,
            &tenant("shop-1"),
            &app.autopilot.promotions,
            now,
        )
        .await
        .unwrap();
        assert_eq!(summary.created, 0);
        assert!(promotion::Entity::find().all(&app.db).await.unwrap().is_empty());
    }
}

mod http {
    use super::*;

    #[tokio::test]
    async fn activate_and_list() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        app.seed_product(
            "shop-1",
            "Croissant",
            8,
            "2.20",
            Some(Utc::now() + Duration::hours(20)),
        )
        .await;

        let res = app
            .post_with_token(routes::PROMOTIONS_EXPIRING_SOON, &json!({}), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["created"], 1);
        assert_eq!(res.body["products"], json!(["Croissant"]));

        let res = app.get_with_token(routes::PROMOTIONS, &token).await;
        assert_eq!(res.status, 200);
        let promotions = res.body.as_array().unwrap();
        assert_eq!(promotions.len(), 1);
        assert_eq!(promotions[0]["promotion_type"], "expiration_alert");
        assert_eq!(promotions[0]["status"], "active");

        let res = app
            .get_with_token(routes::PROMOTIONS, &app.token_for("shop-2"))
            .await;
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn manual_alert_prevents_automatic_duplicate() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let expires = Utc::now() + Duration::hours(20);
        let croissant = app
            .seed_product("shop-1", "Croissant", 8, "2.20", Some(expires))
            .await;

        let res = app
            .post_with_token(
                routes::PROMOTIONS,
                &json!({
                    "product_id": croissant.id,
                    "promotion_type": "expiration_alert",
                    "discount_percentage": 50,
                    "message": "Half price croissants",
                    "start_time": Utc::now().to_rfc3339(),
                    "end_time": expires.to_rfc3339(),
                    "status": "active",
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["created_by"], "manual");
        assert_eq!(res.body["target_audience"], "all");
        assert_eq!(res.body["channels"], json!(["email", "push"]));
        assert_eq!(res.body["sent_count"], 0);

        let res = app
            .post_with_token(routes::PROMOTIONS_EXPIRING_SOON, &json!({}), &token)
            .await;
        assert_eq!(res.body["created"], 0);

        let stored = promotion::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].created_by, OrderOrigin::Manual);
        assert_eq!(stored[0].discount_percentage, 50);
    }

    #[tokio::test]
    async fn manual_promotion_is_validated() {
        let app = TestApp::spawn().await;
        let token = app.token_for("shop-1");
        let start = Utc::now();
        let theirs = app.seed_product("shop-2", "Cake", 3, "20.00", None).await;

        let base = json!({
            "promotion_type": "flash_sale",
            "discount_percentage": 20,
            "message": "Weekend flash sale",
            "start_time": start.to_rfc3339(),
            "end_time": (start + Duration::hours(6)).to_rfc3339(),
        });

        let mut zero_discount = base.clone();
        zero_discount["discount_percentage"] = json!(0);
        let mut backwards = base.clone();
        backwards["end_time"] = json!((start - Duration::hours(1)).to_rfc3339());
        for body in [zero_discount, backwards] {
            let res = app.post_with_token(routes::PROMOTIONS, &body, &token).await;
            assert_eq!(res.status, 400, "{}", res.text);
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }

        let mut foreign = base.clone();
        foreign["product_id"] = json!(theirs.id);
        let res = app.post_with_token(routes::PROMOTIONS, &foreign, &token).await;
        assert_eq!(res.status, 404);

        let res = app.post_with_token(routes::PROMOTIONS, &base, &token).await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["status"], "scheduled");
        assert!(res.body["product_id"].is_null());
    }
}
