use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Row-based distributed lease (§4.4.2): exactly one coordinator process
/// may hold the lease for a room at a time, acquired and renewed via CAS
/// over `lock_version` the same way `games` rows are updated (generalizing
/// the teacher's `adapters::games_sea::optimistic_update_then_fetch`
/// helper rather than inventing a separate locking primitive).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bot_leases")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    #[sea_orm(column_name = "coordinator_id")]
    pub coordinator_id: String,
    #[sea_orm(column_name = "expires_at")]
    pub expires_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
