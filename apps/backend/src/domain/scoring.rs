use crate::domain::rules::penalty_for_remaining_cards;
use crate::domain::state::{GameState, SeatIndex};

/// Result of scoring a finished match: the per-seat penalty applied and
/// whether any seat crossed the game-over threshold (§4.2.3, §4.2.4).
#[derive(Debug, Clone)]
pub struct MatchScoreResult {
    pub penalties: Vec<(SeatIndex, i32)>,
    pub game_over: bool,
}

/// Applies match-end scoring to `state` in place: every seat that didn't
/// empty their hand is penalized by `penalty_for_remaining_cards`, the
/// winner (the seat with an empty hand) gets nothing added. Returns the
/// per-seat deltas applied and whether the game has now ended.
pub fn apply_match_end_scoring(state: &mut GameState) -> MatchScoreResult {
    let mut penalties = Vec::new();
    for seat in state.seats.iter_mut() {
        let remaining = seat.hand.len();
        let delta = penalty_for_remaining_cards(remaining);
        if delta != 0 {
            seat.score += delta;
            penalties.push((seat.index, delta));
        }
    }

    let game_over = state
        .seats
        .iter()
        .any(|s| s.score >= crate::domain::rules::GAME_OVER_SCORE);

    MatchScoreResult { penalties, game_over }
}

/// The game's overall winner once `game_over` has fired: the seat with the
/// lowest cumulative score, ties broken by lowest seat index (§4.2.1,
/// §6.3). Returns every seat's final score alongside, in seat order.
pub fn final_standings(state: &GameState) -> (SeatIndex, Vec<i32>) {
    let final_scores: Vec<i32> = state.seats.iter().map(|s| s.score).collect();
    let winner = state
        .seats
        .iter()
        .min_by(|a, b| a.score.cmp(&b.score).then(a.index.cmp(&b.index)))
        .map(|s| s.index)
        .expect("a game always has at least one seat");
    (winner, final_scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::{Phase, Seat, TimerState};

    fn seat(index: SeatIndex, hand_len: usize, score: i32) -> Seat {
        Seat {
            index,
            actor_identity: format!("p{index}"),
            is_bot: false,
            hand: vec![crate::domain::cards::Card {
                rank: crate::domain::cards::Rank::Three,
                suit: crate::domain::cards::Suit::Diamonds,
            }; hand_len],
            score,
        }
    }

    fn state_with(seats: Vec<Seat>) -> GameState {
        GameState {
            phase: Phase::Playing,
            match_number: 1,
            current_turn: 0,
            passed_since_last_play: vec![],
            last_play: None,
            timer: TimerState::none(),
            seats,
        }
    }

    #[test]
    fn winner_gets_no_penalty_others_scored_by_bracket() {
        let mut state = state_with(vec![seat(0, 0, 0), seat(1, 5, 0), seat(2, 9, 0), seat(3, 13, 0)]);
        let result = apply_match_end_scoring(&mut state);
        assert_eq!(state.seat(0).unwrap().score, 0);
        assert_eq!(state.seat(1).unwrap().score, 10);
        assert_eq!(state.seat(2).unwrap().score, 18);
        assert_eq!(state.seat(3).unwrap().score, 39);
        assert!(!result.game_over);
    }

    #[test]
    fn crossing_threshold_triggers_game_over() {
        let mut state = state_with(vec![seat(0, 0, 0), seat(1, 13, 95)]);
        let result = apply_match_end_scoring(&mut state);
        assert!(result.game_over);
        assert_eq!(state.seat(1).unwrap().score, 95 + 39);
    }
}
