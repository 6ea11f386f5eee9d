//! C2: the pure game state machine. `play_cards`/`player_pass` are the two
//! entry points; both take a `&mut GameState` plus the acting seat and
//! return a `Transition` describing what happened, or a `DomainError` if
//! the move is illegal. Grounded on the teacher's `domain/bidding.rs`
//! pure-mutator style and `services/game_flow/player_actions.rs`'s
//! public/internal method pairing (mirrored one layer up, in
//! `services::gameplay`).

use crate::domain::cards::Card;
use crate::domain::combination::{beats, classify, enumerate_fives, enumerate_pairs, enumerate_triples, Combination, Kind};
use crate::domain::errors::DomainError;
use crate::domain::scoring::{apply_match_end_scoring, MatchScoreResult};
use crate::domain::state::{GameState, LastPlay, Phase, SeatIndex};
use crate::domain::timer;

/// Whether this move installed, cancelled, or left alone the auto-pass
/// timer (§4.3's `timer_started`/`timer_cancelled` events). `None` is not
/// reported as an event; a trick clear cancels the timer implicitly and is
/// never separately reported here (§4.3: "no distinct cancel event").
#[derive(Debug, Clone)]
pub enum TimerChange {
    None,
    Started { seat: SeatIndex, sequence_id: u64, duration_ms: i64 },
    Cancelled { sequence_id: u64 },
}

/// What changed as a result of a successful move. The caller (the service
/// layer) uses this to decide what events to publish and whether to kick
/// off match-end/game-over follow-up work.
#[derive(Debug, Clone)]
pub enum Transition {
    CardsPlayed {
        seat: SeatIndex,
        combination: Combination,
        trick_cleared: bool,
        match_finished: Option<MatchScoreResult>,
        timer_change: TimerChange,
    },
    PlayerPassed {
        seat: SeatIndex,
        trick_cleared: bool,
        timer_change: TimerChange,
    },
    /// §4.3: the auto-pass timer fired. Every seat but `seat` (the one
    /// exempted by the triggering play) is forced to pass and `seat` leads
    /// the next trick.
    TimerExpired {
        seat: SeatIndex,
        sequence_id: u64,
    },
}

/// §4.2.1: validate and apply a play of `cards` by `seat`. `now_ms` and
/// `timer_duration_ms` are supplied by the caller (the service layer) so
/// this function stays a pure mutator with no wall-clock access of its own.
pub fn play_cards(
    state: &mut GameState,
    seat: SeatIndex,
    cards: Vec<Card>,
    now_ms: i64,
    timer_duration_ms: i64,
) -> Result<Transition, DomainError> {
    if !matches!(state.phase, Phase::FirstPlay | Phase::Playing) {
        return Err(DomainError::GameNotActive);
    }
    if state.current_turn != seat {
        return Err(DomainError::NotYourTurn);
    }

    let hand = &state.seat(seat).ok_or(DomainError::SeatMissing)?.hand;
    if !cards.iter().all(|c| hand.contains(c)) {
        return Err(DomainError::CardNotInHand);
    }

    let combination = classify(&cards).ok_or(DomainError::InvalidCombination)?;

    let is_leading = state.last_play.is_none();

    if matches!(state.phase, Phase::FirstPlay) && is_leading {
        let has_three_diamonds = combination.cards.iter().any(|c| {
            c.rank == crate::domain::cards::Rank::Three && c.suit == crate::domain::cards::Suit::Diamonds
        });
        if !has_three_diamonds {
            return Err(DomainError::MustLeadWithThreeOfDiamonds);
        }
    }

    if !is_leading {
        let last = state.last_play.as_ref().expect("checked is_leading above");
        if !beats(&combination, &last.combination) {
            return Err(DomainError::CannotBeat);
        }
    }

    // §4.1 step 8: one-card-left rule. Only singles are constrained, and
    // only when the submitted play is itself a single.
    if combination.kind == Kind::Single {
        if let Some(required) = timer::one_card_left_forcing_single(state, seat) {
            if combination.cards[0] != required {
                return Err(DomainError::MustPlayHighestBeatingSingle);
            }
        }
    }

    // Remove the played cards from the seat's hand.
    {
        let seat_mut = state.seat_mut(seat).ok_or(DomainError::SeatMissing)?;
        for played in &combination.cards {
            let pos = seat_mut
                .hand
                .iter()
                .position(|c| c == played)
                .ok_or(DomainError::CardNotInHand)?;
            seat_mut.hand.remove(pos);
        }
    }

    state.last_play = Some(LastPlay {
        seat,
        combination: combination.clone(),
    });
    state.passed_since_last_play.clear();
    let was_cancelled = timer::cancel(state);

    let timer_change = if timer::is_highest_possible(&timer::remaining_cards(state), &combination) {
        timer::install(state, seat, combination.clone(), now_ms, timer_duration_ms);
        TimerChange::Started { seat, sequence_id: state.timer.sequence_id, duration_ms: timer_duration_ms }
    } else if was_cancelled {
        TimerChange::Cancelled { sequence_id: state.timer.sequence_id }
    } else {
        TimerChange::None
    };

    let hand_emptied = state.seat(seat).map(|s| s.hand.is_empty()).unwrap_or(false);

    let match_finished = if hand_emptied {
        let result = apply_match_end_scoring(state);
        state.phase = if result.game_over { Phase::GameOver } else { Phase::MatchFinished };
        Some(result)
    } else {
        state.current_turn = state.next_seat(seat);
        if matches!(state.phase, Phase::FirstPlay) {
            state.phase = Phase::Playing;
        }
        None
    };

    Ok(Transition::CardsPlayed {
        seat,
        combination,
        trick_cleared: false,
        match_finished,
        timer_change,
    })
}

/// §4.2.2: validate and apply a pass by `seat`. A seat leading a trick (no
/// `last_play` to beat) can never pass, except for the idempotent race
/// exception below.
pub fn player_pass(state: &mut GameState, seat: SeatIndex) -> Result<Transition, DomainError> {
    if !matches!(state.phase, Phase::FirstPlay | Phase::Playing) {
        return Err(DomainError::GameNotActive);
    }
    if state.current_turn != seat {
        return Err(DomainError::NotYourTurn);
    }
    if state.last_play.is_none() {
        // Race exception: an earlier sibling pass already cleared the
        // trick and handed `seat` the lead before this request landed.
        // Treat it as an idempotent no-op rather than an error.
        if state.passed_since_last_play.is_empty() {
            return Ok(Transition::PlayerPassed { seat, trick_cleared: false, timer_change: TimerChange::None });
        }
        return Err(DomainError::CannotPassWhenLeading);
    }
    if timer::one_card_left_forcing_single(state, seat).is_some() {
        return Err(DomainError::MustPlayHighestBeatingSingle);
    }

    if !state.passed_since_last_play.contains(&seat) {
        state.passed_since_last_play.push(seat);
    }

    let trick_cleared = state.trick_is_cleared();
    let timer_change = if trick_cleared {
        // Whether or not a timer was active, its exempt seat (if any) is
        // always the same seat that laid `last_play` — a newer play would
        // have cancelled and replaced any earlier timer — so this single
        // assignment covers both branches of §4.2.2's next-turn rule.
        let winner = state.last_play.as_ref().expect("trick_is_cleared implies last_play").seat;
        state.current_turn = winner;
        state.last_play = None;
        state.passed_since_last_play.clear();
        // A trick clear cancels the timer implicitly; no distinct event.
        timer::cancel(state);
        TimerChange::None
    } else {
        state.current_turn = state.next_seat(seat);
        // §4.3 reason=manual_pass: a pass that doesn't clear the trick
        // still cancels any timer counting down on the current last_play.
        if timer::cancel(state) {
            TimerChange::Cancelled { sequence_id: state.timer.sequence_id }
        } else {
            TimerChange::None
        }
    };

    Ok(Transition::PlayerPassed { seat, trick_cleared, timer_change })
}

/// §4.3: forces the timer's expiry. Called by `services::auto_pass_timer`
/// once `duration_ms` has elapsed since `install`. `fired_sequence_id` is
/// the sequence the scheduling task captured at install time; if it no
/// longer matches the live timer (cancelled or superseded since), this is
/// a stale firing and a no-op. Every seat but the exempt one is marked
/// passed, the exempt seat takes the next turn, and the trick clears.
pub fn execute_timer_expiry(state: &mut GameState, fired_sequence_id: u64) -> Result<Option<Transition>, DomainError> {
    if !timer::is_current(state, fired_sequence_id) {
        return Ok(None);
    }
    let exempt = state.timer.exempt_seat.ok_or(DomainError::StateMissing)?;

    for seat_index in state.seats.iter().map(|s| s.index).collect::<Vec<_>>() {
        if seat_index != exempt && !state.passed_since_last_play.contains(&seat_index) {
            state.passed_since_last_play.push(seat_index);
        }
    }

    let sequence_id = state.timer.sequence_id;
    state.current_turn = exempt;
    state.last_play = None;
    state.passed_since_last_play.clear();
    timer::cancel(state);

    Ok(Some(Transition::TimerExpired { seat: exempt, sequence_id }))
}

/// Every combination `seat` could legally submit to `play_cards` right
/// now: if the seat is leading, every classifiable combination in its
/// hand (filtered to those containing the three of diamonds, on the very
/// first play of the game); otherwise only combinations that `Beats` the
/// current `last_play`, restricted to the same cardinality. Used by bots
/// and by the timer's forced-play check; exposed here rather than buried
/// in `services::ai` because it is pure domain logic a client-facing
/// "show me my legal moves" endpoint could just as well call.
pub fn legal_moves(state: &GameState, seat: SeatIndex) -> Vec<Combination> {
    let Some(hand) = state.seat(seat).map(|s| s.hand.clone()) else {
        return Vec::new();
    };

    let mut candidates = Vec::new();
    for card in &hand {
        if let Some(c) = classify(std::slice::from_ref(card)) {
            candidates.push(c);
        }
    }
    candidates.extend(enumerate_pairs(&hand));
    candidates.extend(enumerate_triples(&hand));
    for kind in [Kind::Straight, Kind::Flush, Kind::FullHouse, Kind::FourOfAKind, Kind::StraightFlush] {
        candidates.extend(enumerate_fives(&hand, kind));
    }

    let must_open_with_three_diamonds = matches!(state.phase, Phase::FirstPlay) && state.last_play.is_none();
    if must_open_with_three_diamonds {
        candidates.retain(|c| {
            c.cards
                .iter()
                .any(|card| card.rank == crate::domain::cards::Rank::Three && card.suit == crate::domain::cards::Suit::Diamonds)
        });
        return candidates;
    }

    let beating: Vec<Combination> = match &state.last_play {
        None => candidates,
        Some(last) => candidates.into_iter().filter(|c| beats(c, &last.combination)).collect(),
    };

    // §4.1 step 8: when the one-card-left rule applies, the only legal
    // single is the forced one; other kinds are unaffected.
    match timer::one_card_left_forcing_single(state, seat) {
        Some(required) => beating.into_iter().filter(|c| c.kind != Kind::Single || c.cards[0] == required).collect(),
        None => beating,
    }
}

/// Starts the next match after `Phase::MatchFinished`: deals a fresh hand
/// (via the caller-supplied `dealt_hands`, produced by `services::dealer`)
/// and resets table state. The winner of the prior match leads (§9 open
/// question 2); the 3♦-opening rule is gated strictly on `match_number ==
/// 1` and therefore never re-applies here.
pub fn start_next_match(state: &mut GameState, leader: SeatIndex, dealt_hands: Vec<Vec<Card>>) -> Result<(), DomainError> {
    if !matches!(state.phase, Phase::MatchFinished) {
        return Err(DomainError::GameNotActive);
    }
    if dealt_hands.len() != state.seat_count() {
        return Err(DomainError::StateMissing);
    }

    for (seat, hand) in state.seats.iter_mut().zip(dealt_hands.into_iter()) {
        seat.hand = hand;
    }
    state.match_number += 1;
    state.current_turn = leader;
    state.last_play = None;
    state.passed_since_last_play.clear();
    timer::cancel(state);
    state.phase = Phase::Playing;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::parse_cards;
    use crate::domain::state::{LastPlay, Seat, TimerState};

    fn two_seat_state(hand0: &[&str], hand1: &[&str]) -> GameState {
        GameState {
            phase: Phase::FirstPlay,
            match_number: 1,
            current_turn: 0,
            passed_since_last_play: vec![],
            last_play: None,
            timer: TimerState::none(),
            seats: vec![
                Seat {
                    index: 0,
                    actor_identity: "p0".into(),
                    is_bot: false,
                    hand: parse_cards(hand0),
                    score: 0,
                },
                Seat {
                    index: 1,
                    actor_identity: "p1".into(),
                    is_bot: false,
                    hand: parse_cards(hand1),
                    score: 0,
                },
            ],
        }
    }

    #[test]
    fn first_play_must_include_three_of_diamonds() {
        let mut state = two_seat_state(&["4D", "5D"], &["3D", "6D"]);
        let err = play_cards(&mut state, 0, parse_cards(&["4D"]), 1_000, 10_000).unwrap_err();
        assert_eq!(err, DomainError::MustLeadWithThreeOfDiamonds);
    }

    #[test]
    fn out_of_turn_play_rejected() {
        let mut state = two_seat_state(&["3D"], &["4D"]);
        let err = play_cards(&mut state, 1, parse_cards(&["4D"]), 1_000, 10_000).unwrap_err();
        assert_eq!(err, DomainError::NotYourTurn);
    }

    #[test]
    fn leading_seat_cannot_pass() {
        let mut state = two_seat_state(&["3D"], &["4D"]);
        let err = player_pass(&mut state, 0).unwrap_err();
        assert_eq!(err, DomainError::CannotPassWhenLeading);
    }

    #[test]
    fn play_advances_turn_and_records_last_play() {
        let mut state = two_seat_state(&["3D", "5D"], &["4D"]);
        play_cards(&mut state, 0, parse_cards(&["3D"]), 1_000, 10_000).unwrap();
        assert_eq!(state.current_turn, 1);
        assert!(state.last_play.is_some());
    }

    #[test]
    fn emptying_hand_finishes_the_match() {
        let mut state = two_seat_state(&["3D"], &["4D", "5D", "6D"]);
        let transition = play_cards(&mut state, 0, parse_cards(&["3D"]), 1_000, 10_000).unwrap();
        match transition {
            Transition::CardsPlayed { match_finished: Some(_), .. } => {}
            other => panic!("expected a finished match, got {other:?}"),
        }
        assert_eq!(state.phase, Phase::MatchFinished);
    }

    fn three_seat_state() -> GameState {
        GameState {
            phase: Phase::Playing,
            match_number: 1,
            current_turn: 0,
            passed_since_last_play: vec![],
            last_play: None,
            timer: TimerState::none(),
            seats: vec![
                Seat { index: 0, actor_identity: "p0".into(), is_bot: false, hand: parse_cards(&["5D", "9C"]), score: 0 },
                Seat { index: 1, actor_identity: "p1".into(), is_bot: false, hand: parse_cards(&["4D", "8C"]), score: 0 },
                Seat { index: 2, actor_identity: "p2".into(), is_bot: false, hand: parse_cards(&["3D", "7C"]), score: 0 },
            ],
        }
    }

    #[test]
    fn all_others_passing_clears_trick_to_winner() {
        let mut state = three_seat_state();
        play_cards(&mut state, 0, parse_cards(&["9C"]), 1_000, 10_000).unwrap();
        assert_eq!(state.current_turn, 1);

        player_pass(&mut state, 1).unwrap();
        assert_eq!(state.current_turn, 2);
        assert!(state.last_play.is_some());

        let transition = player_pass(&mut state, 2).unwrap();
        match transition {
            Transition::PlayerPassed { trick_cleared: true, .. } => {}
            other => panic!("expected trick to clear, got {other:?}"),
        }
        assert_eq!(state.current_turn, 0, "the original winner leads the next trick");
        assert!(state.last_play.is_none());
    }

    #[test]
    fn one_card_left_rule_forbids_passing_with_a_beating_single() {
        // Seat 0 is down to one card after playing 3D, so seat 1 (holding
        // a beating single) may not pass it through.
        let mut state = two_seat_state(&["3D", "5D"], &["2D"]);
        play_cards(&mut state, 0, parse_cards(&["3D"]), 1_000, 10_000).unwrap();
        let err = player_pass(&mut state, 1).unwrap_err();
        assert_eq!(err, DomainError::MustPlayHighestBeatingSingle);
    }

    #[test]
    fn unbeatable_single_installs_an_auto_pass_timer() {
        let mut state = two_seat_state(&["2S", "4C"], &["3D"]);
        state.phase = Phase::Playing;
        state.last_play = Some(LastPlay { seat: 1, combination: classify(&parse_cards(&["3D"])).unwrap() });
        state.current_turn = 0;
        play_cards(&mut state, 0, parse_cards(&["2S"]), 5_000, 10_000).unwrap();
        assert!(state.timer.active);
        assert_eq!(state.timer.exempt_seat, Some(0));
        assert_eq!(state.timer.end_at_ms, 15_000);
    }

    #[test]
    fn a_new_play_cancels_any_prior_timer_before_deciding_whether_to_reinstall() {
        let mut state = two_seat_state(&["9D", "4C"], &["3D", "TC"]);
        state.phase = Phase::Playing;
        state.last_play = Some(LastPlay { seat: 1, combination: classify(&parse_cards(&["3D"])).unwrap() });
        state.current_turn = 0;
        // Simulate a stale timer left over from an earlier, unrelated play.
        state.timer = TimerState { active: true, started_at_ms: 1, duration_ms: 10_000, end_at_ms: 10_001, sequence_id: 5, triggering_play: None, exempt_seat: Some(1) };

        play_cards(&mut state, 0, parse_cards(&["9D"]), 6_000, 10_000).unwrap();
        assert!(!state.timer.active, "9D is beatable by TC, so no new timer should install");
        assert!(state.timer.sequence_id > 5, "cancelling the stale timer must still bump sequence_id");
    }

    #[test]
    fn timer_expiry_forces_remaining_passes_and_hands_the_lead_to_the_exempt_seat() {
        let mut state = three_seat_state();
        play_cards(&mut state, 0, parse_cards(&["9C"]), 1_000, 10_000).unwrap();
        assert!(state.timer.active, "9C is unbeatable here, so the timer should have installed");
        let fired_id = state.timer.sequence_id;

        let transition = execute_timer_expiry(&mut state, fired_id).unwrap().unwrap();
        match transition {
            Transition::TimerExpired { seat, .. } => assert_eq!(seat, 0),
            other => panic!("expected TimerExpired, got {other:?}"),
        }
        assert_eq!(state.current_turn, 0);
        assert!(state.last_play.is_none());
        assert!(state.passed_since_last_play.is_empty());
        assert!(!state.timer.active);
    }

    #[test]
    fn stale_timer_expiry_is_a_no_op() {
        let mut state = three_seat_state();
        play_cards(&mut state, 0, parse_cards(&["9C"]), 1_000, 10_000).unwrap();
        let stale_id = state.timer.sequence_id - 1;
        assert!(execute_timer_expiry(&mut state, stale_id).unwrap().is_none());
        assert!(state.timer.active, "a stale firing must not touch the live timer");
    }

    #[test]
    fn legal_moves_when_leading_must_include_three_of_diamonds_first_match() {
        let state = two_seat_state(&["3D", "4D", "4C"], &["5D"]);
        let moves = legal_moves(&state, 0);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|c| c
            .cards
            .iter()
            .any(|card| card.rank == crate::domain::cards::Rank::Three && card.suit == crate::domain::cards::Suit::Diamonds)));
    }

    #[test]
    fn legal_moves_when_following_only_include_beating_combinations() {
        let mut state = two_seat_state(&["3D", "5D"], &["4D", "2D"]);
        play_cards(&mut state, 0, parse_cards(&["3D"]), 1_000, 10_000).unwrap();
        let moves = legal_moves(&state, 1);
        assert!(moves.iter().all(|c| beats(c, &state.last_play.as_ref().unwrap().combination)));
        assert!(moves.iter().any(|c| c.cards == parse_cards(&["2D"])));
    }
}
