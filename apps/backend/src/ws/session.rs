//! Per-connection websocket actor. Grounded on the teacher's
//! `ws::session`/`ws::game::GameWsSession` actor shape (actix `ws::Actor` +
//! `StreamHandler`), trimmed since this crate has no JWT handshake: a
//! session subscribes to a game's topic and optionally declares which seat
//! it is viewing as (§ Non-goals excludes auth, so nothing stops a client
//! from claiming any seat — out of scope here, same as the teacher's own
//! room-membership checks would be for an unauthenticated deployment).

use std::time::{Duration, Instant};

use actix::{Actor, ActorContext, ActorFutureExt, AsyncContext, Handler, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use uuid::Uuid;

use crate::domain::state::SeatIndex;
use crate::error::AppError;
use crate::repos::games;
use crate::state::app_state::AppState;
use crate::ws::hub::{GameSessionRegistry, ServerPush};
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg, Topic, PROTOCOL_VERSION};

/// Upgrades a plain HTTP request into a `GameWsSession` actor. No identity
/// is established here (§ Non-goals: no auth) — the connection starts
/// unsubscribed and picks its game/viewer seat via `ClientMsg::Subscribe`.
pub async fn upgrade(req: HttpRequest, stream: web::Payload, app_state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let session = GameWsSession::new(app_state.get_ref().clone());
    ws::start(session, &req, stream)
}

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GameWsSession {
    state: AppState,
    registry: std::sync::Arc<GameSessionRegistry>,
    heartbeat: Instant,
    subscription: Option<(i64, Uuid)>,
    viewer_seat: Option<SeatIndex>,
}

impl GameWsSession {
    pub fn new(state: AppState) -> Self {
        let registry = state.broker.registry();
        Self { state, registry, heartbeat: Instant::now(), subscription: None, viewer_seat: None }
    }

    fn heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |session, ctx| {
            if Instant::now().duration_since(session.heartbeat) > CLIENT_TIMEOUT {
                if let Some((game_id, token)) = session.subscription.take() {
                    session.registry.unregister(game_id, token);
                }
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn send_error(&self, ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        let msg = ServerMsg::Error { code, message: message.into() };
        if let Ok(json) = serde_json::to_string(&msg) {
            ctx.text(json);
        }
    }

    async fn load_snapshot(state: AppState, game_id: i64, viewer: SeatIndex) -> Result<ServerMsg, AppError> {
        let game = games::require_game(&state.db, game_id).await?;
        let snapshot = crate::domain::snapshot::snapshot_for(&game.state, viewer).ok_or_else(|| {
            AppError::internal(format!("seat {viewer} does not exist in game {game_id}"))
        })?;
        Ok(ServerMsg::Snapshot { topic: Topic::Game { id: game_id }, version: game.version, game: snapshot })
    }
}

impl Actor for GameWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some((game_id, token)) = self.subscription.take() {
            self.registry.unregister(game_id, token);
        }
    }
}

impl Handler<ServerPush> for GameWsSession {
    type Result = ();

    fn handle(&mut self, msg: ServerPush, ctx: &mut Self::Context) {
        if let Ok(json) = serde_json::to_string(&msg.0) {
            ctx.text(json);
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameWsSession {
    fn handle(&mut self, item: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let msg = match item {
            Ok(msg) => msg,
            Err(_) => {
                ctx.stop();
                return;
            }
        };

        match msg {
            ws::Message::Ping(bytes) => {
                self.heartbeat = Instant::now();
                ctx.pong(&bytes);
            }
            ws::Message::Pong(_) => {
                self.heartbeat = Instant::now();
            }
            ws::Message::Text(text) => {
                self.heartbeat = Instant::now();
                let Ok(client_msg) = serde_json::from_str::<ClientMsg>(&text) else {
                    self.send_error(ctx, ErrorCode::BadRequest, "could not parse message");
                    return;
                };
                self.handle_client_msg(client_msg, ctx);
            }
            ws::Message::Close(reason) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => {}
        }
    }
}

impl GameWsSession {
    fn handle_client_msg(&mut self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientMsg::Hello { .. } => {
                let ack = ServerMsg::HelloAck { protocol: PROTOCOL_VERSION };
                if let Ok(json) = serde_json::to_string(&ack) {
                    ctx.text(json);
                }
            }
            ClientMsg::Subscribe { topic: Topic::Game { id }, viewer_seat } => {
                let Some(seat) = viewer_seat else {
                    self.send_error(ctx, ErrorCode::BadRequest, "subscribing to a game requires viewer_seat");
                    return;
                };
                if let Some((old_id, old_token)) = self.subscription.take() {
                    self.registry.unregister(old_id, old_token);
                }
                let recipient = ctx.address().recipient();
                let token = self.registry.register(id, recipient);
                self.subscription = Some((id, token));
                self.viewer_seat = Some(seat);

                let state = self.state.clone();
                let fut = async move { Self::load_snapshot(state, id, seat).await };
                let fut = actix::fut::wrap_future::<_, Self>(fut);
                ctx.spawn(fut.map(move |result, _session, ctx| match result {
                    Ok(msg) => {
                        if let Ok(json) = serde_json::to_string(&msg) {
                            ctx.text(json);
                        }
                    }
                    Err(err) => {
                        if let Ok(json) = serde_json::to_string(&ServerMsg::Error {
                            code: ErrorCode::BadRequest,
                            message: err.to_string(),
                        }) {
                            ctx.text(json);
                        }
                    }
                }));
            }
            ClientMsg::Unsubscribe { topic: Topic::Game { id } } => {
                if let Some((sub_id, token)) = self.subscription.take() {
                    if sub_id == id {
                        self.registry.unregister(sub_id, token);
                    } else {
                        self.subscription = Some((sub_id, token));
                    }
                }
            }
        }
    }
}
