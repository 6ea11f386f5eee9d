//! Request extractors. Only `game_id` is carried from the teacher's set —
//! `auth_token`, `current_user`/`current_user_db`, `jwt`, `game_membership`,
//! `cached_game_context`, and `validated_json` all exist to enforce
//! identity and room membership, which this engine has no concept of (§
//! Non-goals: no authentication layer, any client may act as any seat).

pub mod game_id;

pub use self::game_id::GameId;
