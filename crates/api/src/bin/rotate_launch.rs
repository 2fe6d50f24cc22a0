//! One-shot launch rotation for cron: ensure the active launch exists, then exit.
//!
//! Reads `DATABASE_URL` and `LAUNCH_UTC_OFFSET_MINUTES` (default `0`).

use std::process::ExitCode;
use std::sync::Arc;

use chrono::FixedOffset;
use scout_api::telemetry::init_tracing;
use scout_core::clock::SystemClock;
use scout_voting::LaunchLifecycle;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    init_tracing("scout_voting=info");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let offset_minutes: i32 = std::env::var("LAUNCH_UTC_OFFSET_MINUTES")
        .unwrap_or_else(|_| "0".into())
        .parse()
        .expect("LAUNCH_UTC_OFFSET_MINUTES must be a valid i32");
    let offset = FixedOffset::east_opt(offset_minutes * 60)
        .expect("LAUNCH_UTC_OFFSET_MINUTES must be within +/- 24 hours");

    let pool = scout_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    scout_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let lifecycle = LaunchLifecycle::new(pool, Arc::new(SystemClock), offset);
    match lifecycle.ensure_active_launch().await {
        Ok(launch) => {
            tracing::info!(launch_id = launch.id, name = %launch.name, "Active launch ensured");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Launch rotation failed");
            ExitCode::FAILURE
        }
    }
}
