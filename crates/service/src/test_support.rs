#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

use models::db::connect_and_migrate;

/// Fresh in-memory SQLite database with every migration applied.
///
/// Each call gets its own database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    connect_and_migrate(&DatabaseConfig::sqlite_memory()).await
}
