use std::time::Duration;

/// Minimum and maximum seat count for a room (§2).
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// A game ends once a player's cumulative score reaches this threshold
/// (§4.2.4). Strictly greater-than-or-equal.
pub const GAME_OVER_SCORE: i32 = 101;

/// Full deck size, used to size per-match deals (§2).
pub const DECK_SIZE: usize = 52;

/// Match-end scoring brackets (§4.2.3), applied to every non-winning seat
/// based on how many cards remain in that seat's hand when the match ends.
pub fn penalty_for_remaining_cards(remaining: usize) -> i32 {
    match remaining {
        0 => 0,
        1..=4 => remaining as i32,
        5..=9 => remaining as i32 * 2,
        10..=13 => remaining as i32 * 3,
        _ => unreachable!("a hand cannot hold more than a full deck"),
    }
}

/// Auto-pass timer duration (§4.3): how long a player has to act before
/// the server auto-passes on their behalf, unless they hold the only card
/// that can beat the current play.
pub const AUTO_PASS_TIMER: Duration = Duration::from_millis(10_000);

/// Bot coordinator think-time delay before acting (§4.4.1), so a bot's
/// move doesn't resolve instantaneously from a human player's perspective.
/// The actual delay is sampled uniformly from this range at decision time
/// (see `EngineConfig::sample_bot_decision_delay`), not a fixed value.
pub const BOT_DECISION_DELAY_MIN: Duration = Duration::from_millis(300);
pub const BOT_DECISION_DELAY_MAX: Duration = Duration::from_millis(500);

/// Bot lease duration (§4.4.2): how long a coordinator holds exclusive
/// rights to drive bot turns for a room before the lease must be renewed
/// or another coordinator may claim it.
pub const BOT_LEASE_DURATION: Duration = Duration::from_secs(45);

/// Safety cap on consecutive bot moves serviced by a single coordinator
/// pass, guarding against a runaway loop from a state machine bug.
pub const MAX_BOT_MOVES_PER_PASS: u32 = 20;
