//! Create `cake` table.
//!
//! `id` is a store-assigned bigserial; title and description are replaced
//! wholesale on update.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cake::Table)
                    .if_not_exists()
                    .col(big_integer(Cake::Id).auto_increment().primary_key())
                    .col(string_len(Cake::Title, 255).not_null())
                    .col(text(Cake::Description).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cake_title")
                    .table(Cake::Table)
                    .col(Cake::Title)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cake::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cake { Table, Id, Title, Description }
