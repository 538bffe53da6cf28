use anyhow::Context;
use tracing::info;

use autopilot_server::autopilot::scheduler::run_autopilot_scheduler;
use autopilot_server::config::AppConfig;
use autopilot_server::state::AppState;
use autopilot_server::{build_router, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    database::ensure_indexes(&db)
        .await
        .context("Failed to ensure indexes")?;

    if config.autopilot.scheduler.enabled {
        tokio::spawn(run_autopilot_scheduler(db.clone(), config.autopilot.clone()));
    } else {
        info!("Autopilot scheduler disabled");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState { db, config });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Autopilot server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
