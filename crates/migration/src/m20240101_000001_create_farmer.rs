//! Create `farmer` table.
//!
//! `federal_identification` holds a CPF (11) or CNPJ (14) and is unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Farmer::Table)
                    .if_not_exists()
                    .col(pk_auto(Farmer::Id))
                    .col(string_len(Farmer::Name, 255).not_null())
                    .col(string_len(Farmer::FederalIdentification, 14).unique_key().not_null())
                    .col(timestamp_with_time_zone(Farmer::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Farmer::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Farmer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Farmer { Table, Id, Name, FederalIdentification, CreatedAt, UpdatedAt }
