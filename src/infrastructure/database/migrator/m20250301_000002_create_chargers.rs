//! Create chargers table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chargers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chargers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Chargers::Name).string().not_null())
                    .col(ColumnDef::new(Chargers::Location).string())
                    .col(
                        ColumnDef::new(Chargers::PricePerHour)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Chargers::ProviderId).string().not_null())
                    .col(
                        ColumnDef::new(Chargers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Chargers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // one name per provider
        manager
            .create_index(
                Index::create()
                    .name("idx_chargers_provider_name")
                    .table(Chargers::Table)
                    .col(Chargers::ProviderId)
                    .col(Chargers::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chargers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Chargers {
    Table,
    Id,
    Name,
    Location,
    PricePerHour,
    ProviderId,
    CreatedAt,
    UpdatedAt,
}
