//! Connection-generic domain-facing wrapper over `adapters::games_sea`.
//! Grounded on the teacher's `repos/games.rs`, enriched with a `version`
//! field and the full deserialized `GameState` — the teacher's own
//! `repos::games::Game` is thinner than what its mutation layer expects.

use sea_orm::ConnectionTrait;

use crate::domain::errors::DomainError;
use crate::domain::state::GameState;
use crate::entities::games;

#[derive(Debug, Clone)]
pub struct Game {
    pub id: i64,
    pub state: GameState,
    pub version: i32,
}

impl TryFrom<games::Model> for Game {
    type Error = DomainError;

    fn try_from(model: games::Model) -> Result<Self, Self::Error> {
        let state: GameState = serde_json::from_value(model.state).map_err(|_| DomainError::HandCorrupt)?;
        Ok(Game {
            id: model.id,
            state,
            version: model.lock_version,
        })
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(conn: &C, game_id: i64) -> Result<Option<Game>, DomainError> {
    let model = crate::adapters::games_sea::find_by_id(conn, game_id).await?;
    model.map(Game::try_from).transpose()
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(conn: &C, game_id: i64) -> Result<Game, DomainError> {
    find_by_id(conn, game_id).await?.ok_or(DomainError::RoomNotFound)
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(conn: &C, state: &GameState) -> Result<Game, DomainError> {
    let seat_count = state.seat_count() as i16;
    let state_json = serde_json::to_value(state).map_err(|_| DomainError::HandCorrupt)?;
    let model = crate::adapters::games_sea::create_game(conn, seat_count, state_json).await?;
    Game::try_from(model)
}

/// Persists `new_state` under a CAS check against `expected_version`.
/// Callers always construct `new_state` by loading the current `Game`,
/// mutating a clone of its `state` via `domain::game`, and passing the
/// result back here — never by mutating a stale copy.
pub async fn update_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected_version: i32,
    new_state: &GameState,
) -> Result<Game, DomainError> {
    let state_json = serde_json::to_value(new_state).map_err(|_| DomainError::HandCorrupt)?;
    let model = crate::adapters::games_sea::update_state(conn, game_id, expected_version, state_json).await?;
    Game::try_from(model)
}
