use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Farm: lookups by owner and dashboard grouping by state
        manager
            .create_index(
                Index::create()
                    .name("idx_farm_farmer")
                    .table(Farm::Table)
                    .col(Farm::FarmerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_farm_state")
                    .table(Farm::Table)
                    .col(Farm::State)
                    .to_owned(),
            )
            .await?;

        // Harvest: lookups by farm and dashboard grouping by culture
        manager
            .create_index(
                Index::create()
                    .name("idx_harvest_farm")
                    .table(Harvest::Table)
                    .col(Harvest::FarmId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_harvest_culture")
                    .table(Harvest::Table)
                    .col(Harvest::Culture)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_harvest_culture").table(Harvest::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_harvest_farm").table(Harvest::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_farm_state").table(Farm::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_farm_farmer").table(Farm::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Farm { Table, FarmerId, State }

#[derive(DeriveIden)]
enum Harvest { Table, FarmId, Culture }
