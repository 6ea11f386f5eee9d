//! Deals a fresh hand into a game whose phase just became
//! `MatchFinished` (§4.2.4: `MatchFinished --(new deal)--> Playing (next
//! match)`). Grounded on `services::game_admin::build_initial_state`'s
//! seed-then-deal shape, reusing `domain::dealer::deal_hands` the same
//! way; the only new piece is picking a fresh seed per match instead of
//! the one fixed seed a brand-new game is created with.

use sea_orm::ConnectionTrait;

use crate::domain::dealer::deal_hands;
use crate::domain::errors::DomainError;
use crate::domain::game::{self, Transition};
use crate::domain::state::SeatIndex;
use crate::repos::games::Game;
use crate::services::mutation::run_mutation;

/// Deals the next match into `game_id`, with `winner` (the seat that just
/// emptied its hand) leading. A no-op error if the game isn't actually in
/// `Phase::MatchFinished` — the caller is expected to have just observed
/// that transition and call this immediately, so a mismatch means a race
/// with another mutation and is surfaced rather than silently ignored.
pub async fn deal_next_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    winner: SeatIndex,
) -> Result<Game, DomainError> {
    let seed: u64 = rand::random();
    let result = run_mutation(conn, game_id, |state| {
        let hands = deal_hands(state.seat_count(), seed)?;
        game::start_next_match(state, winner, hands)
    })
    .await?;
    Ok(result.game)
}

/// If `transition` just finished a match without ending the game, deals
/// the next one immediately and returns the freshly-dealt row. Shared by
/// `services::gameplay` (human plays) and `services::bot_coordinator`
/// (bot plays) so `Phase::MatchFinished` never lingers observably.
pub async fn deal_next_match_if_finished<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    seat: SeatIndex,
    transition: &Transition,
) -> Result<Option<Game>, DomainError> {
    if let Transition::CardsPlayed { match_finished: Some(result), .. } = transition {
        if !result.game_over {
            return Ok(Some(deal_next_match(conn, game_id, seat).await?));
        }
    }
    Ok(None)
}
