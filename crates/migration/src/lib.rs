//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

pub mod policy;

mod m20240101_000001_create_farmer;
mod m20240101_000002_create_farm;
mod m20240101_000003_create_harvest;
mod m20240101_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_farmer::Migration),
            Box::new(m20240101_000002_create_farm::Migration),
            Box::new(m20240101_000003_create_harvest::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000004_add_indexes::Migration),
        ]
    }
}
