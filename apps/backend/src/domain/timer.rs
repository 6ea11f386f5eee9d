//! C3: auto-pass timer and the highest-remaining-card detector (§4.3), plus
//! the one-card-left forcing rule (§4.1 step 8 / §4.2.2 step 3) that shares
//! its "remaining cards" machinery.

use crate::domain::cards::Card;
use crate::domain::combination::{beats, classify, enumerate_fives, enumerate_pairs, enumerate_triples, Combination, Kind};
use crate::domain::state::{GameState, SeatIndex, TimerState};

/// Every card not yet played in this match: still sitting in some seat's
/// hand. A card leaves this set the instant it's removed from a hand by a
/// successful play, so "still in a hand" and "not yet played" coincide —
/// there is no need for the game state to keep a separate played-cards
/// multiset alongside the hands.
pub fn remaining_cards(state: &GameState) -> Vec<Card> {
    state.seats.iter().flat_map(|s| s.hand.iter().copied()).collect()
}

/// `IsHighestPossible(cards)`: true iff no combination of the same
/// cardinality drawn from `remaining` could `Beats` `played`. `remaining`
/// should already exclude `played`'s own cards (call after removing them
/// from the owner's hand, as `play_cards` does).
pub fn is_highest_possible(remaining: &[Card], played: &Combination) -> bool {
    let candidates: Vec<Combination> = match played.cards.len() {
        1 => remaining.iter().filter_map(|c| classify(std::slice::from_ref(c))).collect(),
        2 => enumerate_pairs(remaining),
        3 => enumerate_triples(remaining),
        5 => [Kind::Straight, Kind::Flush, Kind::FullHouse, Kind::FourOfAKind, Kind::StraightFlush]
            .into_iter()
            .flat_map(|kind| enumerate_fives(remaining, kind))
            .collect(),
        _ => Vec::new(),
    };
    !candidates.iter().any(|c| beats(c, played))
}

/// §4.1 step 8 / §4.2.2 step 3: if the seat that would next receive the
/// turn holds exactly one card and `last_play` is a `Single`, every single
/// in `actor`'s hand that beats it is a forcing candidate. Returns the
/// highest such candidate (the one `actor` must play, or whose existence
/// forbids `actor` from passing), or `None` if the rule doesn't apply.
pub fn one_card_left_forcing_single(state: &GameState, actor: SeatIndex) -> Option<Card> {
    let last = state.last_play.as_ref()?;
    if last.combination.kind != Kind::Single {
        return None;
    }
    let next = state.next_seat(actor);
    if state.seat(next)?.hand.len() != 1 {
        return None;
    }
    let last_card = *last.combination.cards.first()?;
    state.seat(actor)?.hand.iter().copied().filter(|&c| c > last_card).max()
}

/// Installs a fresh timer triggered by `seat`'s play of `combination`,
/// bumping `sequence_id` so any previously scheduled firing recognizes
/// itself as stale.
pub fn install(state: &mut GameState, seat: SeatIndex, combination: Combination, now_ms: i64, duration_ms: i64) {
    state.timer = TimerState {
        active: true,
        started_at_ms: now_ms,
        duration_ms,
        end_at_ms: now_ms + duration_ms,
        sequence_id: state.timer.sequence_id + 1,
        triggering_play: Some((combination, seat)),
        exempt_seat: Some(seat),
    };
}

/// Cancels any active timer, bumping `sequence_id` the same way `install`
/// does so an in-flight firing for the cancelled timer is recognized as
/// stale when it arrives. Returns whether a timer was actually active (the
/// caller uses this to decide whether a `timer_cancelled` event is due).
pub fn cancel(state: &mut GameState) -> bool {
    let was_active = state.timer.active;
    if was_active {
        state.timer.sequence_id += 1;
    }
    state.timer.active = false;
    state.timer.started_at_ms = 0;
    state.timer.duration_ms = 0;
    state.timer.end_at_ms = 0;
    state.timer.triggering_play = None;
    state.timer.exempt_seat = None;
    was_active
}

/// A timer firing callback supplies the `sequence_id` it was scheduled
/// for; this is true only if that firing still matches the live timer
/// state (nothing cancelled or superseded it since).
pub fn is_current(state: &GameState, fired_sequence_id: u64) -> bool {
    state.timer.active && state.timer.sequence_id == fired_sequence_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::parse_cards;
    use crate::domain::combination::classify;
    use crate::domain::state::{LastPlay, Phase, Seat};

    fn seat_with_hand(index: SeatIndex, tokens: &[&str]) -> Seat {
        Seat {
            index,
            actor_identity: format!("p{index}"),
            is_bot: false,
            hand: parse_cards(tokens),
            score: 0,
        }
    }

    #[test]
    fn highest_remaining_single_has_no_beating_candidate() {
        // 2S is the top card; nothing remaining can beat it.
        let remaining = parse_cards(&["4D", "9C", "KH"]);
        let played = classify(&parse_cards(&["2S"])).unwrap();
        assert!(is_highest_possible(&remaining, &played));
    }

    #[test]
    fn non_highest_single_has_a_beating_candidate() {
        let remaining = parse_cards(&["2S", "9C"]);
        let played = classify(&parse_cards(&["9C"])).unwrap();
        // 2S remains and beats 9C.
        let remaining_after = parse_cards(&["2S"]);
        assert!(!is_highest_possible(&remaining_after, &played));
        let _ = remaining;
    }

    #[test]
    fn one_card_left_rule_silent_when_next_seat_has_more_than_one_card() {
        let state = GameState {
            phase: Phase::Playing,
            match_number: 1,
            current_turn: 0,
            passed_since_last_play: vec![],
            last_play: Some(LastPlay { seat: 1, combination: classify(&parse_cards(&["4D"])).unwrap() }),
            timer: TimerState::none(),
            seats: vec![seat_with_hand(0, &["9C", "5D"]), seat_with_hand(1, &["3D", "6D"])],
        };
        assert!(one_card_left_forcing_single(&state, 0).is_none());
    }

    #[test]
    fn one_card_left_rule_picks_highest_beating_single() {
        let state = GameState {
            phase: Phase::Playing,
            match_number: 1,
            current_turn: 0,
            passed_since_last_play: vec![],
            last_play: Some(LastPlay { seat: 1, combination: classify(&parse_cards(&["4D"])).unwrap() }),
            timer: TimerState::none(),
            seats: vec![seat_with_hand(0, &["9C", "5D", "7D"]), seat_with_hand(1, &["3D"])],
        };
        let forced = one_card_left_forcing_single(&state, 0).unwrap();
        assert_eq!(forced, parse_cards(&["9C"])[0]);
    }

    #[test]
    fn stale_firing_is_recognized() {
        let mut state = GameState {
            phase: Phase::Playing,
            match_number: 1,
            current_turn: 0,
            passed_since_last_play: vec![],
            last_play: None,
            timer: TimerState::none(),
            seats: vec![seat_with_hand(0, &["3D"])],
        };
        install(&mut state, 0, classify(&parse_cards(&["3D"])).unwrap(), 1_000, 10_000);
        let fired_id = state.timer.sequence_id;
        assert!(is_current(&state, fired_id));
        cancel(&mut state);
        assert!(!is_current(&state, fired_id));
    }
}
