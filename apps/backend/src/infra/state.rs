//! Builder for constructing `AppState`, grounded on the teacher's
//! `infra::state::StateBuilder` (profile-gated connection, panics in
//! production if no profile was chosen). The mock-strict test database the
//! teacher defaults to is dropped here: this crate's tests run against a
//! real Postgres `DbProfile::Test` database instead, since the engine has
//! no auth layer worth mocking around and the CAS-heavy repos need real
//! transaction semantics to test meaningfully.

use crate::config::db::DbProfile;
use crate::config::engine::EngineConfig;
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::state::app_state::AppState;

pub struct StateBuilder {
    engine: EngineConfig,
    db_profile: DbProfile,
    db_profile_set: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self { engine: EngineConfig::default(), db_profile: DbProfile::Prod, db_profile_set: false }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self.db_profile_set = true;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if !self.db_profile_set {
            panic!("AppState builder requires an explicit DB profile");
        }
        let conn = connect_db(self.db_profile, crate::config::db::DbOwner::App).await?;
        let coordinator_id = uuid::Uuid::new_v4().to_string();
        Ok(AppState::new(conn, self.engine, coordinator_id))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
