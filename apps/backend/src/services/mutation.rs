//! Load-mutate-persist helper shared by every service-layer operation that
//! changes a game's state. Grounded on the teacher's
//! `services/game_flow/mutation.rs::run_mutation`, simplified: the teacher
//! threads a `GameFlowMutationResult{final_game, old_version, transitions}`
//! through a boxed-future closure taking `(&GameFlowService,
//! &DatabaseTransaction)`; here the closure is a plain, synchronous
//! `&mut GameState -> Result<T, DomainError>` mutator, since every
//! `domain::game` entry point is itself synchronous and pure.

use sea_orm::ConnectionTrait;

use crate::domain::errors::DomainError;
use crate::domain::state::GameState;
use crate::repos::games::{self, Game};

pub struct MutationResult<T> {
    pub game: Game,
    pub old_version: i32,
    pub outcome: T,
}

/// Loads `game_id`'s current row, applies `op` to its in-memory state, and
/// persists the result under a CAS keyed on the version the load observed.
/// A concurrent writer racing this same game_id surfaces as
/// `DomainError::ConcurrentUpdate` from `repos::games::update_state`; the
/// caller decides whether to retry with fresh state.
pub async fn run_mutation<C, T>(
    conn: &C,
    game_id: i64,
    op: impl FnOnce(&mut GameState) -> Result<T, DomainError>,
) -> Result<MutationResult<T>, DomainError>
where
    C: ConnectionTrait + Send + Sync,
{
    let current = games::require_game(conn, game_id).await?;
    let mut state = current.state.clone();

    let outcome = op(&mut state)?;

    let game = games::update_state(conn, game_id, current.version, &state).await?;
    Ok(MutationResult { game, old_version: current.version, outcome })
}
