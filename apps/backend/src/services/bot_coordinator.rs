//! C4: drives bot seats forward after a human (or another bot) moves.
//! Grounded on the teacher's `services/game_flow/ai_coordinator.rs`
//! (cache-free here, since a single `GameState` load already has
//! everything a decision needs) plus its lease acquisition pattern from
//! `repos::bot_leases` (§4.4). A game whose current seat is a bot after a
//! move is driven by whichever process's request happened to trigger that
//! move — the lease exists purely to stop two concurrent triggers from
//! racing the same seat, not to assign ownership long-term.

use std::time::OffsetDateTime;

use tracing::{info, warn};

use crate::ai::{self, BotDecision};
use crate::domain::errors::DomainError;
use crate::domain::game::{self, TimerChange, Transition};
use crate::domain::state::Phase;
use crate::domain::timer;
use crate::error::AppError;
use crate::repos::games::{self, Game};
use crate::repos::bot_leases;
use crate::services::clock;
use crate::services::dealer::deal_next_match_if_finished;
use crate::services::mutation::run_mutation;
use crate::state::app_state::AppState;
use crate::ws::protocol::GameEvent;

/// Fires `drive` on a detached task so the RPC that triggered it doesn't
/// wait on however many bot turns follow. Errors are logged, not
/// propagated — there is no caller left to propagate them to.
pub fn spawn_drive(state: AppState, game_id: i64) {
    actix_web::rt::spawn(async move {
        if let Err(err) = drive(&state, game_id).await {
            warn!(game_id, error = %err, "bot coordinator pass ended in error");
        }
    });
}

/// Runs bot turns for `game_id` until a human seat is on turn, the match
/// ends, or `max_bot_moves_per_pass` is reached (§4.4: "loop bounded by
/// MAX_BOT_MOVES"). Acquires the row-based lease first; if another process
/// already holds it, this call is a no-op — that process is already
/// driving the same seats.
pub async fn drive(state: &AppState, game_id: i64) -> Result<(), AppError> {
    let now = OffsetDateTime::now_utc();
    let lease = match bot_leases::try_acquire(&state.db, game_id, &state.coordinator_id, now, state.engine.bot_lease_duration).await
    {
        Ok(lease) => lease,
        Err(DomainError::ConcurrentUpdate) => return Ok(()),
        Err(other) => return Err(other.into()),
    };

    let mut moves_made = 0u32;
    while moves_made < state.engine.max_bot_moves_per_pass {
        let game = games::require_game(&state.db, game_id).await?;
        if !matches!(game.state.phase, Phase::FirstPlay | Phase::Playing) {
            break;
        }

        let seat_index = game.state.current_turn;
        let Some(seat) = game.state.seat(seat_index) else { break };
        if !seat.is_bot {
            break;
        }
        let Some(difficulty) = seat.actor_identity.strip_prefix("bot:") else {
            warn!(game_id, seat = seat_index, identity = %seat.actor_identity, "bot seat has no bot: difficulty prefix");
            break;
        };
        let Some(bot) = ai::create_ai(difficulty) else {
            warn!(game_id, seat = seat_index, difficulty, "unregistered bot difficulty");
            break;
        };

        let legal = game::legal_moves(&game.state, seat_index);
        let can_pass =
            game.state.last_play.is_some() && timer::one_card_left_forcing_single(&game.state, seat_index).is_none();
        let is_leading = game.state.last_play.is_none();
        let other_hand_sizes: Vec<(u8, usize)> = game
            .state
            .seats
            .iter()
            .filter(|s| s.index != seat_index)
            .map(|s| (s.index, s.hand.len()))
            .collect();
        let last_play_seat = game.state.last_play.as_ref().map(|lp| lp.seat);

        tokio::time::sleep(state.engine.sample_bot_decision_delay()).await;

        let situation = ai::Situation {
            legal_moves: &legal,
            is_leading,
            can_pass,
            hand: &seat.hand,
            other_hand_sizes: &other_hand_sizes,
            last_play_seat,
        };
        let decision = bot.decide(&situation).map_err(|err| AppError::internal(err.to_string()))?;

        let now_ms = clock::now_ms();
        let timer_duration_ms = state.engine.auto_pass_timer.as_millis() as i64;
        let (new_game, transition, dealt) = match decision {
            BotDecision::Play(combo) => {
                let result = run_mutation(&state.db, game_id, |gs| {
                    game::play_cards(gs, seat_index, combo.cards.clone(), now_ms, timer_duration_ms)
                })
                .await?;
                let dealt = deal_next_match_if_finished(&state.db, game_id, seat_index, &result.outcome).await?;
                (result.game, result.outcome, dealt)
            }
            BotDecision::Pass => {
                let result = run_mutation(&state.db, game_id, |gs| game::player_pass(gs, seat_index)).await?;
                (result.game, result.outcome, None)
            }
        };

        publish_bot_transition(state, game_id, &new_game, &transition, dealt.as_ref());
        moves_made += 1;
    }

    if moves_made >= state.engine.max_bot_moves_per_pass {
        warn!(game_id, "bot coordinator hit max_bot_moves_per_pass without reaching a human turn");
    }
    info!(game_id, moves_made, "bot coordinator pass complete");

    bot_leases::release(&state.db, game_id, &state.coordinator_id).await.map_err(AppError::from)
}

fn publish_bot_timer_change(state: &AppState, game_id: i64, timer_change: &TimerChange) {
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

fn publish_bot_transition(state: &AppState, game_id: i64, game: &Game, transition: &Transition, dealt: Option<&Game>) {
    let new_state = &game.state;
    let version = game.version;
    match transition {
        Transition::CardsPlayed { seat, combination, match_finished, timer_change, .. } => {
            state.broker.publish(game_id, GameEvent::CardsPlayed { seat: *seat, cards: combination.cards.clone(), version });
            publish_bot_timer_change(state, game_id, timer_change);
            match match_finished {
                Some(result) if result.game_over => {
                    let (final_winner_index, final_scores) = crate::domain::scoring::final_standings(new_state);
                    state.broker.publish(game_id, GameEvent::GameOver { final_winner_index, final_scores, version });
                }
                Some(_) => {
                    let snapshot = crate::domain::snapshot::snapshot_for(new_state, *seat).expect("acting seat exists");
                    state.broker.publish(game_id, GameEvent::MatchEnded { snapshot, version });
                    if let Some(dealt) = dealt {
                        let snapshot =
                            crate::domain::snapshot::snapshot_for(&dealt.state, *seat).expect("winning seat exists");
                        state.broker.publish(game_id, GameEvent::NextMatchDealt { snapshot, version: dealt.version });
                    }
                }
                None => {}
            }
        }
        Transition::PlayerPassed { seat, trick_cleared, timer_change } => {
            state.broker.publish(game_id, GameEvent::PlayerPassed { seat: *seat, version });
            publish_bot_timer_change(state, game_id, timer_change);
            if *trick_cleared {
                // `player_pass` sets `current_turn` to the trick's winner
                // before clearing `last_play`, so read it from there.
                state.broker.publish(game_id, GameEvent::TrickCleared { winner: new_state.current_turn, version });
            }
        }
        Transition::TimerExpired { .. } => {
            unreachable!("play_cards/player_pass never return TimerExpired; only execute_timer_expiry does")
        }
    }
}
