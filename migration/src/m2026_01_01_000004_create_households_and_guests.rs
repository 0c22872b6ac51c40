//! Migration to create the households and guests tables.
//!
//! A household groups one or more guests. The single primary contact per
//! household is maintained by the application, not by a constraint.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Households::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Households::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Households::UserId).uuid().not_null())
                    .col(ColumnDef::new(Households::Address1).text().null())
                    .col(ColumnDef::new(Households::Address2).text().null())
                    .col(ColumnDef::new(Households::City).text().null())
                    .col(ColumnDef::new(Households::State).text().null())
                    .col(ColumnDef::new(Households::Country).text().null())
                    .col(ColumnDef::new(Households::ZipCode).text().null())
                    .col(ColumnDef::new(Households::Phone).text().null())
                    .col(ColumnDef::new(Households::Email).text().null())
                    .col(ColumnDef::new(Households::Notes).text().null())
                    .col(
                        ColumnDef::new(Households::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Households::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_households_user_id")
                            .from(Households::Table, Households::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Guests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Guests::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Guests::UserId).uuid().not_null())
                    .col(ColumnDef::new(Guests::HouseholdId).uuid().not_null())
                    .col(ColumnDef::new(Guests::FirstName).text().not_null())
                    .col(ColumnDef::new(Guests::LastName).text().not_null())
                    .col(
                        ColumnDef::new(Guests::IsPrimaryContact)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Guests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Guests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guests_household_id")
                            .from(Guests::Table, Guests::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guests_user_id")
                            .from(Guests::Table, Guests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_households_user_id")
                    .table(Households::Table)
                    .col(Households::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guests_household_id")
                    .table(Guests::Table)
                    .col(Guests::HouseholdId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guests_user_name")
                    .table(Guests::Table)
                    .col(Guests::UserId)
                    .col(Guests::LastName)
                    .col(Guests::FirstName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Households::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Households {
    Table,
    Id,
    UserId,
    Address1,
    Address2,
    City,
    State,
    Country,
    ZipCode,
    Phone,
    Email,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Guests {
    Table,
    Id,
    UserId,
    HouseholdId,
    FirstName,
    LastName,
    IsPrimaryContact,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
