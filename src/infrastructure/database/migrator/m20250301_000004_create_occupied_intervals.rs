//! Create occupied_intervals table
//!
//! Appended only by payment commits. The unique `(charger_id, start_time)`
//! index serializes racing commits for the same slot at the storage level.

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_chargers::Chargers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OccupiedIntervals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OccupiedIntervals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OccupiedIntervals::ChargerId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OccupiedIntervals::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OccupiedIntervals::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_occupied_intervals_charger")
                            .from(OccupiedIntervals::Table, OccupiedIntervals::ChargerId)
                            .to(Chargers::Table, Chargers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_occupied_intervals_charger_start")
                    .table(OccupiedIntervals::Table)
                    .col(OccupiedIntervals::ChargerId)
                    .col(OccupiedIntervals::StartTime)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OccupiedIntervals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum OccupiedIntervals {
    Table,
    Id,
    ChargerId,
    StartTime,
    EndTime,
}
