//! Game-related HTTP routes: the two action RPCs (§6) plus a read-only
//! snapshot endpoint for initial client sync. Grounded on the teacher's
//! `routes/games.rs`; `get_snapshot`'s `If-None-Match`/304 handling is
//! carried essentially unchanged, the action handlers are net-new (the
//! teacher's equivalent routes are bidding/trick-play routes gated behind
//! JWT auth this crate has no counterpart for).

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::domain::cards::Card;
use crate::domain::state::SeatIndex;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::game_id::GameId;
use crate::http::etag::game_etag;
use crate::repos::games;
use crate::services::gameplay;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlayCardsBody {
    pub seat: SeatIndex,
    pub cards: Vec<Card>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerPassBody {
    pub seat: SeatIndex,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotQuery {
    pub seat: SeatIndex,
}

/// POST /api/games/{game_id}/play
async fn play_cards(
    http_req: HttpRequest,
    game_id: GameId,
    body: web::Json<PlayCardsBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let transition =
        gameplay::play_cards(&app_state, Some(&http_req), game_id.0, body.seat, body.cards).await?;
    Ok(HttpResponse::Ok().json(TransitionResponse::from(&transition)))
}

/// POST /api/games/{game_id}/pass
async fn player_pass(
    http_req: HttpRequest,
    game_id: GameId,
    body: web::Json<PlayerPassBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let transition = gameplay::player_pass(&app_state, Some(&http_req), game_id.0, body.seat).await?;
    Ok(HttpResponse::Ok().json(TransitionResponse::from(&transition)))
}

#[derive(serde::Serialize)]
struct TransitionResponse {
    trick_cleared: bool,
}

impl From<&crate::domain::game::Transition> for TransitionResponse {
    fn from(transition: &crate::domain::game::Transition) -> Self {
        use crate::domain::game::Transition as T;
        let trick_cleared = match transition {
            T::CardsPlayed { trick_cleared, .. } | T::PlayerPassed { trick_cleared, .. } => *trick_cleared,
            T::TimerExpired { .. } => {
                unreachable!("play_cards/player_pass never return TimerExpired; only execute_timer_expiry does")
            }
        };
        Self { trick_cleared }
    }
}

/// GET /api/games/{game_id}/state?seat={seat}
///
/// Returns the seat's view of the current game snapshot with an ETag
/// keyed on the game's optimistic-lock version. Supports `If-None-Match`
/// for HTTP caching: a matching ETag returns `304 Not Modified`.
async fn get_state(
    http_req: HttpRequest,
    game_id: GameId,
    query: web::Query<SnapshotQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let viewer = query.seat;

    let (snapshot, version) = with_txn(Some(&http_req), &app_state.db, |txn| async move {
        let game = games::find_by_id(&*txn, id)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::GameNotFound, format!("game {id} not found")))?;
        let snapshot = crate::domain::snapshot::snapshot_for(&game.state, viewer)
            .ok_or_else(|| AppError::invalid(ErrorCode::InvalidGameId, format!("seat {viewer} does not exist in game {id}")))?;
        Ok((snapshot, game.version))
    })
    .await?;

    let etag_value = game_etag(id, version);
    if let Some(if_none_match) = http_req.headers().get(IF_NONE_MATCH) {
        if let Ok(client_etag) = if_none_match.to_str() {
            let matches = client_etag.trim() == "*"
                || client_etag.split(',').map(str::trim).any(|etag| etag == etag_value);
            if matches {
                return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED).insert_header((ETAG, etag_value)).finish());
            }
        }
    }

    Ok(HttpResponse::Ok().insert_header((ETAG, etag_value)).json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/games/{game_id}/play").route(web::post().to(play_cards)));
    cfg.service(web::resource("/api/games/{game_id}/pass").route(web::post().to(player_pass)));
    cfg.service(web::resource("/api/games/{game_id}/state").route(web::get().to(get_state)));
}
