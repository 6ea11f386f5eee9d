//! The service layer bridges `domain`/`repos` (pure rules + persistence)
//! to the web and realtime boundary. Grounded on the teacher's
//! `services/game_flow/` split: `mutation` is the CAS-wrapped
//! load-mutate-persist helper (teacher's `mutation::run_mutation`),
//! `gameplay` is the public/internal entry-point pairing (teacher's
//! `player_actions::submit_bid`/`submit_bid_internal`), `bot_coordinator`
//! is the lease-guarded bot-turn loop (teacher's `ai_coordinator`), and
//! `auto_pass_timer` is the on-demand countdown (net-new; C3 has no
//! teacher counterpart since Nommie has no auto-pass rule). `game_admin`
//! seeds a fresh table (teacher's `services/games.rs`); `dealer` deals
//! every match after the first, the same way but from a fresh seed each
//! time; `clock` is the single wall-clock access point the pure domain
//! layer is kept clear of.

pub mod auto_pass_timer;
pub mod bot_coordinator;
pub mod clock;
pub mod dealer;
pub mod game_admin;
pub mod gameplay;
pub mod mutation;
