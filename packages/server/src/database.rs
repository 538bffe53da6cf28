use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::entity::{autopilot_setting, price_sync_queue};

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    sync_schema(&db).await?;

    Ok(db)
}

/// Create or update every table declared under `crate::entity`.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.get_schema_registry("autopilot_server::entity::*")
        .sync(db)
        .await?;
    Ok(())
}

/// Create the composite indexes the schema sync cannot express.
///
/// Failures are logged and skipped; the service works without them, only slower.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Queue claim: WHERE user_id = ? AND sync_status = 'pending' ORDER BY created_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_price_sync_queue_claim")
        .table(price_sync_queue::Entity)
        .col(price_sync_queue::Column::UserId)
        .col(price_sync_queue::Column::SyncStatus)
        .col(price_sync_queue::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);
    create_index(db, "idx_price_sync_queue_claim", &stmt).await;

    // One settings row per tenant and module.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_autopilot_setting_user_module")
        .table(autopilot_setting::Entity)
        .col(autopilot_setting::Column::UserId)
        .col(autopilot_setting::Column::ModuleName)
        .to_string(PostgresQueryBuilder);
    create_index(db, "idx_autopilot_setting_user_module", &stmt).await;

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, stmt: &str) {
    match db.execute_unprepared(stmt).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => warn!("Failed to create index {}: {}", name, e),
    }
}
