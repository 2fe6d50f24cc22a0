use std::sync::Arc;

use scout_core::clock::Clock;
use scout_voting::{LaunchLifecycle, ProjectCatalog, VoteLedger};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and services are handles, the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scout_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Time source shared with the voting services.
    pub clock: Arc<dyn Clock>,
    pub lifecycle: LaunchLifecycle,
    pub ledger: VoteLedger,
    pub catalog: ProjectCatalog,
    /// Outbound HTTP client for OAuth providers.
    pub http: reqwest::Client,
}

impl AppState {
    /// Wire the voting services onto one pool and clock.
    pub fn new(pool: scout_db::DbPool, config: ServerConfig, clock: Arc<dyn Clock>) -> Self {
        let lifecycle = LaunchLifecycle::new(pool.clone(), Arc::clone(&clock), config.launch_offset());
        let ledger = VoteLedger::new(pool.clone(), Arc::clone(&clock));
        let catalog = ProjectCatalog::new(pool.clone(), lifecycle.clone());
        Self {
            pool,
            config: Arc::new(config),
            clock,
            lifecycle,
            ledger,
            catalog,
            http: reqwest::Client::new(),
        }
    }
}
