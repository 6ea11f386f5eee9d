//! Wire protocol for the realtime channel. Grounded on the teacher's
//! `ws/protocol.rs` tagged-enum shape (`ClientMsg`/`ServerMsg` with a
//! `type`/`kind` discriminant field), generalized from Nommie's
//! bid/trump/trick vocabulary to this engine's event set (§6: event bus
//! topics/kinds).

use serde::{Deserialize, Serialize};

use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::SeatIndex;

pub const PROTOCOL_VERSION: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topic {
    Game { id: i64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello { protocol: i32 },
    Subscribe { topic: Topic, viewer_seat: Option<SeatIndex> },
    Unsubscribe { topic: Topic },
}

/// One event per state-changing outcome of `domain::game`/`domain::timer`,
/// broadcast to every subscriber of a game's topic. Carries just enough to
/// let a client update its view without re-fetching a snapshot, except
/// `MatchEnded` which always carries the authoritative snapshot since
/// scores changed for every seat at once. `GameOver` carries the final
/// per-seat scores and overall winner directly (§4.2.1, §6.3) rather than
/// a viewer-scoped snapshot, since there is no single seat left to view
/// the end state from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    CardsPlayed { seat: SeatIndex, cards: Vec<crate::domain::cards::Card>, version: i32 },
    PlayerPassed { seat: SeatIndex, version: i32 },
    TrickCleared { winner: SeatIndex, version: i32 },
    TimerStarted { seat: SeatIndex, sequence_id: u64, duration_ms: u64 },
    TimerCancelled { sequence_id: u64 },
    TimerExpired { seat: SeatIndex, sequence_id: u64, version: i32 },
    MatchEnded { snapshot: GameSnapshot, version: i32 },
    NextMatchDealt { snapshot: GameSnapshot, version: i32 },
    GameOver { final_winner_index: SeatIndex, final_scores: Vec<i32>, version: i32 },
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck { protocol: i32 },
    Ack { message: &'static str },
    Snapshot { topic: Topic, version: i32, game: GameSnapshot },
    Event { topic: Topic, event: GameEvent },
    Error { code: ErrorCode, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadProtocol,
    BadTopic,
    BadRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_subscribe_round_trips_through_json() {
        let msg = ClientMsg::Subscribe { topic: Topic::Game { id: 7 }, viewer_seat: Some(2) };
        let json = serde_json::to_string(&msg).unwrap();
        let back: ClientMsg = serde_json::from_str(&json).unwrap();
        match back {
            ClientMsg::Subscribe { topic: Topic::Game { id }, viewer_seat } => {
                assert_eq!(id, 7);
                assert_eq!(viewer_seat, Some(2));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn game_event_tag_is_the_event_name() {
        let event = GameEvent::TrickCleared { winner: 1, version: 4 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "trick_cleared");
    }
}
