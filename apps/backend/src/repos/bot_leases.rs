//! Connection-generic wrapper over `adapters::bot_leases_sea`.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::domain::errors::DomainError;
use crate::entities::bot_leases;

#[derive(Debug, Clone)]
pub struct BotLease {
    pub game_id: i64,
    pub coordinator_id: String,
    pub expires_at: OffsetDateTime,
}

impl From<bot_leases::Model> for BotLease {
    fn from(model: bot_leases::Model) -> Self {
        BotLease {
            game_id: model.game_id,
            coordinator_id: model.coordinator_id,
            expires_at: model.expires_at,
        }
    }
}

pub async fn try_acquire<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    coordinator_id: &str,
    now: OffsetDateTime,
    lease_duration: std::time::Duration,
) -> Result<BotLease, DomainError> {
    let new_expires_at = now + lease_duration;
    let model = crate::adapters::bot_leases_sea::try_acquire(conn, game_id, coordinator_id, now, new_expires_at).await?;
    Ok(BotLease::from(model))
}

pub async fn release<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    coordinator_id: &str,
) -> Result<(), DomainError> {
    crate::adapters::bot_leases_sea::release(conn, game_id, coordinator_id).await?;
    Ok(())
}
