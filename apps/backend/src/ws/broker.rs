//! Publishes `GameEvent`s to every websocket session subscribed to a game.
//! This is the E2 event-bus boundary the service layer writes to; it never
//! reads back from it. Grounded on the teacher's `ws::broker`, trimmed to
//! this crate's single in-process `GameSessionRegistry` (no Redis relay).

use std::sync::Arc;

use crate::ws::hub::GameSessionRegistry;
use crate::ws::protocol::{GameEvent, ServerMsg, Topic};

#[derive(Clone)]
pub struct Broker {
    registry: Arc<GameSessionRegistry>,
}

impl Broker {
    pub fn new(registry: Arc<GameSessionRegistry>) -> Self {
        Self { registry }
    }

    pub fn publish(&self, game_id: i64, event: GameEvent) {
        self.registry.broadcast(game_id, ServerMsg::Event { topic: Topic::Game { id: game_id }, event });
    }

    pub fn registry(&self) -> Arc<GameSessionRegistry> {
        self.registry.clone()
    }
}
