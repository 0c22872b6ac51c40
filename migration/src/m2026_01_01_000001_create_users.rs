//! Migration to create the users table.
//!
//! A user is the couple's account and the root tenant every other row hangs off.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).text().null())
                    .col(ColumnDef::new(Users::GroomFirstName).text().not_null())
                    .col(ColumnDef::new(Users::GroomLastName).text().not_null())
                    .col(ColumnDef::new(Users::BrideFirstName).text().not_null())
                    .col(ColumnDef::new(Users::BrideLastName).text().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    GroomFirstName,
    GroomLastName,
    BrideFirstName,
    BrideLastName,
    CreatedAt,
    UpdatedAt,
}
