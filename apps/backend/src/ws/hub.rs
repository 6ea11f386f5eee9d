//! In-process fan-out registry: which websocket sessions are subscribed to
//! which game's topic. Grounded on the teacher's `ws::hub::GameSessionRegistry`
//! (`DashMap`-keyed session registry, `Uuid` session tokens, an
//! active-connection counter logged on register/unregister) with the
//! Redis-backed cross-process pub/sub dropped: E2 is specified as an
//! external collaborator with an assumed at-least-once delivery mechanism,
//! and this crate has no Redis dependency to back that assumption with, so
//! fan-out here is single-process only (documented in DESIGN.md).

use std::sync::atomic::{AtomicUsize, Ordering};

use actix::prelude::*;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct ServerPush(pub ServerMsg);

type SessionMap = DashMap<Uuid, Recipient<ServerPush>>;

pub struct GameSessionRegistry {
    sessions: DashMap<i64, SessionMap>,
    active_connections: AtomicUsize,
}

impl GameSessionRegistry {
    pub fn new() -> Self {
        Self { sessions: DashMap::new(), active_connections: AtomicUsize::new(0) }
    }

    pub fn register(&self, game_id: i64, recipient: Recipient<ServerPush>) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions.entry(game_id).or_default().insert(token, recipient);
        let active = self.active_connections.fetch_add(1, Ordering::Relaxed) + 1;
        info!(game_id, active_connections = active, "websocket session registered");
        token
    }

    pub fn unregister(&self, game_id: i64, token: Uuid) {
        let now_empty = match self.sessions.get_mut(&game_id) {
            Some(entry) => {
                let was_present = entry.remove(&token).is_some();
                if was_present {
                    self.active_connections.fetch_sub(1, Ordering::Relaxed);
                }
                entry.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.sessions.remove(&game_id);
        }
    }

    /// Pushes `msg` to every session currently subscribed to `game_id`.
    /// Delivery failures (a dead `Recipient`) are dropped silently — the
    /// session actor's own mailbox closing is how it learns it disconnected.
    pub fn broadcast(&self, game_id: i64, msg: ServerMsg) {
        if let Some(entry) = self.sessions.get(&game_id) {
            for session in entry.iter() {
                session.value().do_send(ServerPush(msg.clone()));
            }
        }
    }

    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::Relaxed)
    }
}

impl Default for GameSessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistering_the_last_session_clears_the_game_entry() {
        let registry = GameSessionRegistry::new();
        assert_eq!(registry.active_connections(), 0);
    }
}
