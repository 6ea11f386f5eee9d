use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::combination::Combination;

/// Index of a seat at the table, `0..seat_count`. Turn order is always
/// `(i + 1) mod seat_count` (§9 open question 1 — resolved in favor of the
/// uniform formula everywhere in this crate).
pub type SeatIndex = u8;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The very first play of the very first match of the game: the
    /// leader must open with the three of diamonds (§4.1.2).
    FirstPlay,
    Playing,
    /// A match has ended (one seat emptied their hand); scores have been
    /// applied and the room is waiting to start the next match.
    MatchFinished,
    /// A seat has reached the termination score; the game is over.
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub index: SeatIndex,
    pub actor_identity: String,
    pub is_bot: bool,
    pub hand: Vec<Card>,
    pub score: i32,
}

/// Server-side record of the last accepted play, needed to judge future
/// `Beats` checks and to detect when a trick is cleared (every other seat
/// passes in turn).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastPlay {
    pub seat: SeatIndex,
    pub combination: Combination,
}

/// Auto-pass timer bookkeeping (C3, §4.3). `sequence_id` is bumped on every
/// install/cancel so a stale timer firing after a newer one was installed
/// can recognize itself as superseded and no-op. `started_at_ms`/`end_at_ms`
/// are server wall-clock values in epoch milliseconds; `remaining_ms` is
/// derived lazily by callers, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    pub active: bool,
    pub started_at_ms: i64,
    pub duration_ms: i64,
    pub end_at_ms: i64,
    pub sequence_id: u64,
    pub triggering_play: Option<(Combination, SeatIndex)>,
    pub exempt_seat: Option<SeatIndex>,
}

impl TimerState {
    pub fn none() -> Self {
        TimerState {
            active: false,
            started_at_ms: 0,
            duration_ms: 0,
            end_at_ms: 0,
            sequence_id: 0,
            triggering_play: None,
            exempt_seat: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub match_number: u32,
    pub seats: Vec<Seat>,
    pub current_turn: SeatIndex,
    /// Seats still active in the current trick (have not passed since the
    /// last accepted play). Cleared back to "all seats" whenever a trick
    /// resets.
    pub passed_since_last_play: Vec<SeatIndex>,
    pub last_play: Option<LastPlay>,
    pub timer: TimerState,
}

impl GameState {
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn seat(&self, index: SeatIndex) -> Option<&Seat> {
        self.seats.iter().find(|s| s.index == index)
    }

    pub fn seat_mut(&mut self, index: SeatIndex) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.index == index)
    }

    pub fn next_seat(&self, from: SeatIndex) -> SeatIndex {
        ((from as usize + 1) % self.seat_count()) as SeatIndex
    }

    /// Every other seat has passed since the last accepted play: the trick
    /// is over and `last_play`'s owner leads next with a clean slate.
    pub fn trick_is_cleared(&self) -> bool {
        match &self.last_play {
            None => false,
            Some(lp) => {
                let others: Vec<SeatIndex> = self
                    .seats
                    .iter()
                    .map(|s| s.index)
                    .filter(|&i| i != lp.seat)
                    .collect();
                others.iter().all(|i| self.passed_since_last_play.contains(i))
            }
        }
    }
}
