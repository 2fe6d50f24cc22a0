use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use scout_core::clock::SystemClock;
use tokio_util::sync::CancellationToken;

use scout_api::config::ServerConfig;
use scout_api::router::build_app_router;
use scout_api::state::AppState;
use scout_api::telemetry::init_tracing;
use scout_voting::scheduler;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    init_tracing("scout_api=debug,scout_voting=debug,tower_http=debug");

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        launch_utc_offset_minutes = config.launch_utc_offset_minutes,
        "Loaded server configuration"
    );

    let pool = connect_database().await;

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let rotation_interval = Duration::from_secs(config.launch_rotation_interval_secs);
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let state = AppState::new(pool, config, Arc::new(SystemClock));

    // --- Launch rotation ---
    let rotation_cancel = CancellationToken::new();
    let rotation_handle = tokio::spawn(scheduler::run(
        state.lifecycle.clone(),
        rotation_interval,
        rotation_cancel.clone(),
    ));

    // --- Start server ---
    let app = build_app_router(state);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    rotation_cancel.cancel();
    if tokio::time::timeout(shutdown_timeout, rotation_handle)
        .await
        .is_err()
    {
        tracing::warn!("Launch rotation job did not stop in time");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Connect, verify, and migrate the database. Any failure aborts startup.
async fn connect_database() -> scout_db::DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = scout_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    scout_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    scout_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database ready");
    pool
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
