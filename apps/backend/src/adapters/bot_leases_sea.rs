//! SeaORM adapter for the `bot_leases` row-based lease (§4.4.2). Same CAS
//! technique as `adapters::games_sea`, applied to a net-new table — the
//! teacher has no cross-process AI race to guard against (its AI runs
//! synchronously inside the same transaction as the human's move), so this
//! table and adapter are new, but the locking primitive is the teacher's.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::bot_leases;

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<bot_leases::Model>, sea_orm::DbErr> {
    bot_leases::Entity::find_by_id(game_id).one(conn).await
}

/// Inserts a fresh lease row. Called once, the first time a room needs
/// bot coordination; afterwards leases are acquired via `try_acquire`.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    coordinator_id: &str,
    expires_at: OffsetDateTime,
) -> Result<bot_leases::Model, sea_orm::DbErr> {
    let active = bot_leases::ActiveModel {
        game_id: Set(game_id),
        coordinator_id: Set(coordinator_id.to_string()),
        expires_at: Set(expires_at),
        lock_version: Set(1),
    };
    active.insert(conn).await
}

/// Attempts to claim or renew the lease: succeeds only if the row is
/// currently unclaimed (expired) or already held by `coordinator_id`.
/// Returns `RecordNotFound` (mapped upstream as "someone else holds it")
/// when the CAS filter matches zero rows for a reason other than the row
/// being entirely absent.
pub async fn try_acquire<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    coordinator_id: &str,
    now: OffsetDateTime,
    new_expires_at: OffsetDateTime,
) -> Result<bot_leases::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::{Condition, Expr};

    let current = find(conn, game_id).await?;
    let Some(current) = current else {
        return create(conn, game_id, coordinator_id, new_expires_at).await;
    };

    let claimable = Condition::any()
        .add(bot_leases::Column::ExpiresAt.lte(now))
        .add(bot_leases::Column::CoordinatorId.eq(coordinator_id));

    let result = bot_leases::Entity::update_many()
        .col_expr(bot_leases::Column::CoordinatorId, Expr::val(coordinator_id).into())
        .col_expr(bot_leases::Column::ExpiresAt, Expr::val(new_expires_at).into())
        .col_expr(bot_leases::Column::LockVersion, Expr::col(bot_leases::Column::LockVersion).add(1))
        .filter(bot_leases::Column::GameId.eq(game_id))
        .filter(bot_leases::Column::LockVersion.eq(current.lock_version))
        .filter(claimable)
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::Custom("LEASE_HELD_BY_OTHER".to_string()));
    }

    find(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("bot lease not found".to_string()))
}

/// Releases the lease early (coordinator found no bot move to make). Only
/// the current holder can release, via the same CAS filter.
pub async fn release<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    coordinator_id: &str,
) -> Result<(), sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    bot_leases::Entity::update_many()
        .col_expr(bot_leases::Column::ExpiresAt, Expr::val(OffsetDateTime::UNIX_EPOCH).into())
        .col_expr(bot_leases::Column::LockVersion, Expr::col(bot_leases::Column::LockVersion).add(1))
        .filter(bot_leases::Column::GameId.eq(game_id))
        .filter(bot_leases::Column::CoordinatorId.eq(coordinator_id))
        .exec(conn)
        .await?;
    Ok(())
}
