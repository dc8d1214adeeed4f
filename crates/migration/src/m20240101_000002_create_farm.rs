//! Create `farm` table with nullable FK to `farmer`.
use sea_orm_migration::{prelude::*, schema::*};

use crate::policy;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Farm::Table)
                    .if_not_exists()
                    .col(pk_auto(Farm::Id))
                    .col(string_len(Farm::Name, 255).not_null())
                    .col(string_len(Farm::City, 255).not_null())
                    .col(string_len(Farm::State, 64).not_null())
                    .col(double(Farm::TotalArea).not_null())
                    .col(double(Farm::AgricultureArea).not_null())
                    .col(double(Farm::VegetationArea).not_null())
                    .col(ColumnDef::new(Farm::FarmerId).integer().null())
                    .col(timestamp_with_time_zone(Farm::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Farm::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_farm_farmer")
                            .from(Farm::Table, Farm::FarmerId)
                            .to(Farmer::Table, Farmer::Id)
                            .on_delete(policy::FARM_ON_FARMER_DELETE)
                            .on_update(policy::ON_PARENT_UPDATE),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Farm::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Farm {
    Table,
    Id,
    Name,
    City,
    State,
    TotalArea,
    AgricultureArea,
    VegetationArea,
    FarmerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Farmer { Table, Id }
