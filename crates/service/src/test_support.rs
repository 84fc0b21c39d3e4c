#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_and_migrate, DatabaseConfig};

/// Private in-memory database per call, schema applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_and_migrate(&DatabaseConfig::in_memory()).await?;
    Ok(db)
}
