//! Create `harvest` table with nullable FK to `farm`.
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
                    .table(Harvest::Table)
                    .if_not_exists()
                    .col(pk_auto(Harvest::Id))
                    .col(integer(Harvest::Year).not_null())
                    .col(string_len(Harvest::Culture, 128).not_null())
                    .col(ColumnDef::new(Harvest::FarmId).integer().null())
                    .col(timestamp_with_time_zone(Harvest::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Harvest::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_harvest_farm")
                            .from(Harvest::Table, Harvest::FarmId)
                            .to(Farm::Table, Farm::Id)
                            .on_delete(policy::HARVEST_ON_FARM_DELETE)
                            .on_update(policy::ON_PARENT_UPDATE),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Harvest::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Harvest { Table, Id, Year, Culture, FarmId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Farm { Table, Id }
