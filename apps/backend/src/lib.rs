//! Server-authoritative Big Two engine: pure game rules in `domain`,
//! CAS-guarded persistence in `repos`/`adapters`/`entities`, the service
//! layer bridging the two to HTTP/websocket in `services`, and the bot
//! decision policies in `ai`. Grounded on the teacher's crate layout.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic, clippy::todo, clippy::unimplemented))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod test_support;
pub mod trace_ctx;
pub mod ws;

pub use config::db::{db_url, DbOwner, DbProfile};
pub use db::txn::{with_txn, SharedTxn};
pub use db::txn_policy::{set_txn_policy, TxnPolicy};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::game_id::GameId;
pub use infra::db::connect_db;
pub use state::app_state::AppState;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
