//! Public entry points for the two action RPCs (§6: `PlayCards`,
//! `PlayerPass`). Grounded on the teacher's
//! `services/game_flow/player_actions.rs` public/internal pairing: the
//! public function opens (or reuses) a transaction, applies the mutation,
//! publishes events, and — unlike the teacher, which calls
//! `process_game_state` inline — kicks off the bot coordinator as a
//! detached task so the HTTP response doesn't wait on however many bot
//! turns follow.

use actix_web::HttpRequest;
use sea_orm::ConnectionTrait;

use crate::db::txn::with_txn;
use crate::domain::cards::Card;
use crate::domain::game::{self, TimerChange, Transition};
use crate::domain::state::SeatIndex;
use crate::error::AppError;
use crate::repos::games::Game;
use crate::services::mutation::run_mutation;
use crate::state::app_state::AppState;
use crate::ws::protocol::GameEvent;

async fn play_cards_internal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    seat: SeatIndex,
    cards: Vec<Card>,
    now_ms: i64,
    timer_duration_ms: i64,
) -> Result<(Game, Transition, Option<Game>), AppError> {
    let result =
        run_mutation(conn, game_id, |state| game::play_cards(state, seat, cards, now_ms, timer_duration_ms)).await?;
    let dealt = crate::services::dealer::deal_next_match_if_finished(conn, game_id, seat, &result.outcome).await?;
    Ok((result.game, result.outcome, dealt))
}

async fn player_pass_internal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    seat: SeatIndex,
) -> Result<(Game, Transition), AppError> {
    let result = run_mutation(conn, game_id, |state| game::player_pass(state, seat)).await?;
    Ok((result.game, result.outcome))
}

fn publish_timer_change(state: &AppState, game_id: i64, timer_change: &TimerChange) {
    match timer_change {
        TimerChange::None => {}
        TimerChange::Started { seat, sequence_id, duration_ms } => {
            state.broker.publish(
                game_id,
                GameEvent::TimerStarted { seat: *seat, sequence_id: *sequence_id, duration_ms: *duration_ms as u64 },
            );
            crate::services::auto_pass_timer::schedule(state.clone(), game_id, *sequence_id, *duration_ms);
        }
        TimerChange::Cancelled { sequence_id } => {
            state.broker.publish(game_id, GameEvent::TimerCancelled { sequence_id: *sequence_id });
        }
    }
}

/// Publishes the `timer_expired` + trailing `trick_cleared` events once
/// `services::auto_pass_timer` has applied the forced passes. Not folded
/// into `publish_transition` since `Transition::TimerExpired` is never
/// returned by `play_cards`/`player_pass`, only by `execute_timer_expiry`.
pub fn publish_timer_expiry(state: &AppState, game_id: i64, game: &Game, transition: &Transition) {
    if let Transition::TimerExpired { seat, sequence_id } = transition {
        state.broker.publish(game_id, GameEvent::TimerExpired { seat: *seat, sequence_id: *sequence_id, version: game.version });
        state.broker.publish(game_id, GameEvent::TrickCleared { winner: *seat, version: game.version });
    }
}

fn publish_transition(state: &AppState, game_id: i64, game: &Game, transition: &Transition, dealt: Option<&Game>) {
    match transition {
        Transition::CardsPlayed { seat, combination, match_finished, timer_change, .. } => {
            state.broker.publish(
                game_id,
                GameEvent::CardsPlayed { seat: *seat, cards: combination.cards.clone(), version: game.version },
            );
            publish_timer_change(state, game_id, timer_change);
            match match_finished {
                Some(result) if result.game_over => {
                    let (final_winner_index, final_scores) = crate::domain::scoring::final_standings(&game.state);
                    state.broker.publish(
                        game_id,
                        GameEvent::GameOver { final_winner_index, final_scores, version: game.version },
                    );
                }
                Some(_) => {
                    let snapshot = crate::domain::snapshot::snapshot_for(&game.state, *seat)
                        .expect("the acting seat always exists in its own game");
                    state.broker.publish(game_id, GameEvent::MatchEnded { snapshot, version: game.version });
                    if let Some(dealt) = dealt {
                        let snapshot = crate::domain::snapshot::snapshot_for(&dealt.state, *seat)
                            .expect("the winning seat always exists in its own game");
                        state.broker.publish(game_id, GameEvent::NextMatchDealt { snapshot, version: dealt.version });
                    }
                }
                None => {}
            }
        }
        Transition::PlayerPassed { seat, trick_cleared, timer_change } => {
            state.broker.publish(game_id, GameEvent::PlayerPassed { seat: *seat, version: game.version });
            publish_timer_change(state, game_id, timer_change);
            if *trick_cleared {
                // `player_pass` already set `current_turn` to the trick's
                // winner and cleared `last_play` by the time this runs, so
                // `current_turn` (not `last_play.seat`, which is gone) is
                // the winner to report.
                state.broker.publish(game_id, GameEvent::TrickCleared { winner: game.state.current_turn, version: game.version });
            }
        }
        Transition::TimerExpired { .. } => {
            unreachable!("play_cards/player_pass never return TimerExpired; only execute_timer_expiry does")
        }
    }
}

pub async fn play_cards(
    state: &AppState,
    req: Option<&HttpRequest>,
    game_id: i64,
    seat: SeatIndex,
    cards: Vec<Card>,
) -> Result<Transition, AppError> {
    let now_ms = crate::services::clock::now_ms();
    let timer_duration_ms = state.engine.auto_pass_timer.as_millis() as i64;
    let (game, transition, dealt) = with_txn(req, &state.db, |txn| async move {
        play_cards_internal(&*txn, game_id, seat, cards, now_ms, timer_duration_ms).await
    })
    .await?;

    publish_transition(state, game_id, &game, &transition, dealt.as_ref());
    crate::services::bot_coordinator::spawn_drive(state.clone(), game_id);
    Ok(transition)
}

pub async fn player_pass(
    state: &AppState,
    req: Option<&HttpRequest>,
    game_id: i64,
    seat: SeatIndex,
) -> Result<Transition, AppError> {
    let (game, transition) =
        with_txn(req, &state.db, |txn| async move { player_pass_internal(&*txn, game_id, seat).await }).await?;

    publish_transition(state, game_id, &game, &transition, None);
    crate::services::bot_coordinator::spawn_drive(state.clone(), game_id);
    Ok(transition)
}
