//! Room/match bootstrap: the one piece of lobby-adjacent plumbing this
//! engine needs even though lobby membership itself is out of scope (§
//! Non-goals). Grounded loosely in the teacher's `services/games.rs`
//! `GameService::load_game_state` shape (a service-layer constructor of a
//! fresh `GameState`), replacing its hardcoded stub hands with the real
//! `domain::dealer::deal_hands` shuffle.

use sea_orm::ConnectionTrait;

use crate::domain::dealer::{deal_hands, find_three_of_diamonds_holder};
use crate::domain::errors::DomainError;
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::{GameState, Phase, Seat, TimerState};
use crate::repos::games::{self, Game};

/// Builds the opening `GameState` for a fresh table: deals hands with
/// `seed`, seats `actor_identities` in order (bots identified by the
/// `"bot:<difficulty>"` convention, §4.4.1), and starts `Phase::FirstPlay`
/// with the three of diamonds' holder on turn (§4.1.2 — this only applies
/// to the very first match of the game; later matches carry the prior
/// winner forward via `domain::game::start_next_match` instead). Split out
/// from `create_game` as a pure function so the seating/dealing logic is
/// unit-testable without a database.
pub fn build_initial_state(actor_identities: &[(String, bool)], seed: u64) -> Result<GameState, DomainError> {
    let seat_count = actor_identities.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seat_count) {
        return Err(DomainError::StateMissing);
    }

    let hands = deal_hands(seat_count, seed)?;
    let leader = find_three_of_diamonds_holder(&hands).ok_or(DomainError::StateMissing)?;

    let seats = actor_identities
        .iter()
        .cloned()
        .zip(hands)
        .enumerate()
        .map(|(index, ((actor_identity, is_bot), hand))| Seat {
            index: index as u8,
            actor_identity,
            is_bot,
            hand,
            score: 0,
        })
        .collect();

    Ok(GameState {
        phase: Phase::FirstPlay,
        match_number: 1,
        seats,
        current_turn: leader as u8,
        passed_since_last_play: vec![],
        last_play: None,
        timer: TimerState::none(),
    })
}

/// Seeds a brand-new game row from `build_initial_state`.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor_identities: Vec<(String, bool)>,
    seed: u64,
) -> Result<Game, DomainError> {
    let state = build_initial_state(&actor_identities, seed)?;
    games::create_game(conn, &state).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actors(n: usize) -> Vec<(String, bool)> {
        (0..n).map(|i| (format!("p{i}"), false)).collect()
    }

    #[test]
    fn four_seat_table_opens_with_the_three_of_diamonds_holder_on_turn() {
        let state = build_initial_state(&actors(4), 42).unwrap();
        assert_eq!(state.phase, Phase::FirstPlay);
        let leader = state.seat(state.current_turn).unwrap();
        assert!(leader.hand.iter().any(|c| {
            c.rank == crate::domain::cards::Rank::Three && c.suit == crate::domain::cards::Suit::Diamonds
        }));
    }

    #[test]
    fn seats_are_indexed_in_the_order_given() {
        let ids = vec![("alice".to_string(), false), ("bot:hard".to_string(), true)];
        let state = build_initial_state(&ids, 7).unwrap();
        assert_eq!(state.seats[0].actor_identity, "alice");
        assert!(!state.seats[0].is_bot);
        assert_eq!(state.seats[1].actor_identity, "bot:hard");
        assert!(state.seats[1].is_bot);
    }

    #[test]
    fn rejects_seat_counts_outside_range() {
        assert_eq!(build_initial_state(&actors(1), 1).unwrap_err(), DomainError::StateMissing);
        assert_eq!(build_initial_state(&actors(5), 1).unwrap_err(), DomainError::StateMissing);
    }
}
