use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A room's entire game state is persisted as a single JSONB blob rather
/// than normalized per-seat/per-play rows, following the teacher's
/// `round_hands.cards: Json` precedent for variable-shaped per-player data
/// but taken one step further: the room's hands, played cards, scores and
/// timer all change together on every move, so there is no independent
/// query access pattern that would benefit from normalization.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "seat_count")]
    pub seat_count: i16,
    /// Serialized `crate::domain::state::GameState`.
    pub state: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::bot_leases::Entity")]
    BotLease,
}

impl Related<super::bot_leases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BotLease.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
