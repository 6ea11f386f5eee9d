//! Path-parameter extractor for `{game_id}`, validating both the format
//! and that the game actually exists before a handler runs. Grounded on
//! the teacher's `extractors/game_id.rs`; the JWT/membership check that
//! precedes the database lookup there has no counterpart here (§
//! Non-goals: no auth layer, any client may act as any seat).

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::db::txn::SharedTxn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::games;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct GameId(pub i64);

impl FromRequest for GameId {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let raw = req
                .match_info()
                .get("game_id")
                .ok_or_else(|| AppError::invalid(ErrorCode::InvalidGameId, "missing game_id path parameter"))?;
            let game_id = raw
                .parse::<i64>()
                .map_err(|_| AppError::invalid(ErrorCode::InvalidGameId, format!("invalid game id: {raw}")))?;
            if game_id <= 0 {
                return Err(AppError::invalid(ErrorCode::InvalidGameId, format!("game id must be positive, got {game_id}")));
            }

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let found = match req.extensions().get::<SharedTxn>() {
                Some(shared) => games::find_by_id(shared.transaction(), game_id).await?,
                None => games::find_by_id(&app_state.db, game_id).await?,
            };
            if found.is_none() {
                return Err(AppError::not_found(ErrorCode::GameNotFound, format!("game {game_id} not found")));
            }

            Ok(GameId(game_id))
        })
    }
}
