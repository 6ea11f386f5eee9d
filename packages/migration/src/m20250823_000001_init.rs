use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Games {
    Table,
    Id,
    SeatCount,
    State,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum BotLeases {
    Table,
    GameId,
    CoordinatorId,
    ExpiresAt,
    LockVersion,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::SeatCount).small_integer().not_null())
                    .col(ColumnDef::new(Games::State).json_binary().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BotLeases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BotLeases::GameId).big_integer().not_null().primary_key())
                    .col(ColumnDef::new(BotLeases::CoordinatorId).string().not_null())
                    .col(
                        ColumnDef::new(BotLeases::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BotLeases::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bot_leases_game_id")
                            .from(BotLeases::Table, BotLeases::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_bot_leases_expires_at")
                    .table(BotLeases::Table)
                    .col(BotLeases::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ix_bot_leases_expires_at")
                    .table(BotLeases::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(BotLeases::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        Ok(())
    }
}
