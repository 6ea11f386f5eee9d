//! Realtime transport (E2's concrete in-process implementation): an actix
//! websocket actor per connection (`session`), a registry of subscribers
//! per game (`hub`), and the publish-side handle the service layer holds
//! (`broker`). See module docs on each for what's kept/dropped relative to
//! the teacher.

pub mod broker;
pub mod hub;
pub mod protocol;
pub mod session;

pub use broker::Broker;
pub use hub::GameSessionRegistry;
