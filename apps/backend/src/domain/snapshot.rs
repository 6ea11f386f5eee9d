//! Viewer-safe projections of `GameState`: a seat only ever sees its own
//! hand, never anyone else's (§6.2). Grounded on the teacher's
//! `domain/snapshot.rs` shape of a parallel "public view" struct.

use serde::Serialize;

use crate::domain::combination::Combination;
use crate::domain::state::{GameState, Phase, SeatIndex};

#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub index: SeatIndex,
    pub actor_identity: String,
    pub is_bot: bool,
    pub hand_size: usize,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LastPlayView {
    pub seat: SeatIndex,
    pub combination: Combination,
}

/// Present only while the auto-pass countdown (§4.3) is running. A client
/// reconnecting mid-countdown needs `end_at_ms`/`sequence_id` to resume
/// rendering it without having seen the original `timer_started` event.
#[derive(Debug, Clone, Serialize)]
pub struct TimerView {
    pub sequence_id: u64,
    pub end_at_ms: i64,
    pub exempt_seat: SeatIndex,
}

/// What a given `viewer` seat is allowed to see: every seat's public
/// metadata and hand *size*, but only the viewer's own hand contents.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub match_number: u32,
    pub seats: Vec<SeatView>,
    pub current_turn: SeatIndex,
    pub last_play: Option<LastPlayView>,
    pub timer: Option<TimerView>,
    pub your_seat: SeatIndex,
    pub your_hand: Vec<crate::domain::cards::Card>,
}

pub fn snapshot_for(state: &GameState, viewer: SeatIndex) -> Option<GameSnapshot> {
    let viewer_seat = state.seat(viewer)?;
    let your_hand = viewer_seat.hand.clone();

    let seats = state
        .seats
        .iter()
        .map(|s| SeatView {
            index: s.index,
            actor_identity: s.actor_identity.clone(),
            is_bot: s.is_bot,
            hand_size: s.hand.len(),
            score: s.score,
        })
        .collect();

    let last_play = state.last_play.as_ref().map(|lp| LastPlayView {
        seat: lp.seat,
        combination: lp.combination.clone(),
    });

    let timer = state.timer.active.then(|| TimerView {
        sequence_id: state.timer.sequence_id,
        end_at_ms: state.timer.end_at_ms,
        exempt_seat: state.timer.exempt_seat.unwrap_or(state.current_turn),
    });

    Some(GameSnapshot {
        phase: state.phase,
        match_number: state.match_number,
        seats,
        current_turn: state.current_turn,
        last_play,
        timer,
        your_seat: viewer,
        your_hand,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::parse_cards;
    use crate::domain::state::{Seat, TimerState};

    #[test]
    fn viewer_only_sees_own_hand_contents() {
        let seat0 = Seat {
            index: 0,
            actor_identity: "alice".into(),
            is_bot: false,
            hand: parse_cards(&["3D", "4D"]),
            score: 0,
        };
        let seat1 = Seat {
            index: 1,
            actor_identity: "bob".into(),
            is_bot: false,
            hand: parse_cards(&["5D", "6D", "7D"]),
            score: 0,
        };
        let state = GameState {
            phase: Phase::Playing,
            match_number: 1,
            current_turn: 0,
            passed_since_last_play: vec![],
            last_play: None,
            timer: TimerState::none(),
            seats: vec![seat0, seat1],
        };

        let snap = snapshot_for(&state, 0).unwrap();
        assert_eq!(snap.your_hand, parse_cards(&["3D", "4D"]));
        assert_eq!(snap.seats[1].hand_size, 3);
    }

    #[test]
    fn active_timer_is_surfaced_in_the_snapshot() {
        let seat0 = Seat { index: 0, actor_identity: "alice".into(), is_bot: false, hand: parse_cards(&["2S"]), score: 0 };
        let mut state = GameState {
            phase: Phase::Playing,
            match_number: 1,
            current_turn: 0,
            passed_since_last_play: vec![],
            last_play: None,
            timer: TimerState::none(),
            seats: vec![seat0],
        };
        crate::domain::timer::install(
            &mut state,
            0,
            crate::domain::combination::classify(&parse_cards(&["2S"])).unwrap(),
            1_000,
            10_000,
        );

        let snap = snapshot_for(&state, 0).unwrap();
        let timer = snap.timer.expect("timer should be active");
        assert_eq!(timer.end_at_ms, 11_000);
        assert_eq!(timer.exempt_seat, 0);
    }

    #[test]
    fn unknown_viewer_returns_none() {
        let state = GameState {
            phase: Phase::Playing,
            match_number: 1,
            current_turn: 0,
            passed_since_last_play: vec![],
            last_play: None,
            timer: TimerState::none(),
            seats: vec![],
        };
        assert!(snapshot_for(&state, 0).is_none());
    }
}
