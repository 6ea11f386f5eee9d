use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::engine::EngineConfig;
use crate::ws::{Broker, GameSessionRegistry};

/// Shared application state. No security/session config exists here since
/// this engine has no authentication layer (§ Non-goals) — `AppState` is
/// just the database handle, the tunable engine constants, the realtime
/// broker, and a stable per-process id the bot coordinator uses as its
/// lease holder identity.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub engine: EngineConfig,
    pub broker: Broker,
    pub coordinator_id: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, engine: EngineConfig, coordinator_id: String) -> Self {
        let registry = Arc::new(GameSessionRegistry::new());
        Self { db, engine, broker: Broker::new(registry), coordinator_id }
    }
}
