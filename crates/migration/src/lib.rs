//! Migrator registering entity-specific migrations in dependency order.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_students;
mod m20240101_000002_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_students::Migration),
            Box::new(m20240101_000002_create_users::Migration),
        ]
    }
}
