//! C3: executes the auto-pass timer once it expires. `schedule` is called
//! right after a `TimerChange::Started` is observed (by `services::gameplay`
//! and `services::bot_coordinator`); it sleeps `duration_ms` on a detached
//! task and then applies `domain::game::execute_timer_expiry` through the
//! usual CAS-guarded `run_mutation`. Net-new relative to the teacher, which
//! has no equivalent countdown — grounded on `bot_coordinator::spawn_drive`'s
//! detached-task-with-logged-errors shape.

use std::time::Duration;

use tracing::warn;

use crate::domain::game::{self, Transition};
use crate::error::AppError;
use crate::services::gameplay::publish_timer_expiry;
use crate::services::mutation::run_mutation;
use crate::state::app_state::AppState;

/// Spawns the countdown for a timer just installed at `sequence_id`. The
/// sleep is best-effort: if the timer is cancelled or superseded before it
/// elapses, `execute_timer_expiry` recognizes the stale `sequence_id` and
/// this task's firing is a silent no-op.
pub fn schedule(state: AppState, game_id: i64, sequence_id: u64, duration_ms: i64) {
    let duration = Duration::from_millis(duration_ms.max(0) as u64);
    actix_web::rt::spawn(async move {
        tokio::time::sleep(duration).await;
        if let Err(err) = fire(&state, game_id, sequence_id).await {
            warn!(game_id, sequence_id, error = %err, "auto-pass timer firing failed");
        }
    });
}

async fn fire(state: &AppState, game_id: i64, sequence_id: u64) -> Result<(), AppError> {
    let result = run_mutation(&state.db, game_id, |gs| game::execute_timer_expiry(gs, sequence_id)).await?;

    if let Some(transition @ Transition::TimerExpired { .. }) = result.outcome {
        publish_timer_expiry(state, game_id, &result.game, &transition);
        crate::services::bot_coordinator::spawn_drive(state.clone(), game_id);
    }
    Ok(())
}
