//! Create `students` table.
//!
//! `email` carries the uniqueness constraint; ids are storage-assigned.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Students::Name, 255).not_null())
                    .col(string_len(Students::Email, 255).unique_key().not_null())
                    .col(string_len(Students::Course, 255).not_null())
                    .col(string_len(Students::Department, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Students::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Students { Table, Id, Name, Email, Course, Department }
