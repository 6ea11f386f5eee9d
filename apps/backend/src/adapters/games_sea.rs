//! SeaORM adapter for the `games` entity — generic over `ConnectionTrait`.
//! Returns `DbErr`; the repo layer maps that to `DomainError` at the
//! boundary. Grounded directly on the teacher's
//! `adapters/games_sea/mod.rs::optimistic_update_then_fetch`.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::games;

/// Consolidates the CAS update pattern: bump `lock_version` and
/// `updated_at`, filter on `id` + the caller's observed `lock_version`,
/// and distinguish "row gone" from "version mismatch" by rows_affected.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    current_lock_version: i32,
    configure_update: F,
) -> Result<games::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<games::Entity>) -> sea_orm::UpdateMany<games::Entity>,
{
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(games::Entity::update_many())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(games::Column::LockVersion, Expr::col(games::Column::LockVersion).add(1))
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let game = games::Entity::find_by_id(id).one(conn).await?;
        if let Some(game) = game {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, game.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        }
        return Err(sea_orm::DbErr::RecordNotFound("Game not found".to_string()));
    }

    games::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    seat_count: i16,
    initial_state: serde_json::Value,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = games::ActiveModel {
        id: NotSet,
        seat_count: Set(seat_count),
        state: Set(initial_state),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };
    active.insert(conn).await
}

/// Overwrite the `state` blob under a CAS check. This is the single
/// mutation point every gameplay transition goes through after applying a
/// `domain::game` transition in memory.
pub async fn update_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    current_lock_version: i32,
    new_state: serde_json::Value,
) -> Result<games::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    optimistic_update_then_fetch(conn, game_id, current_lock_version, |update| {
        update.col_expr(games::Column::State, Expr::val(new_state).into())
    })
    .await
}
