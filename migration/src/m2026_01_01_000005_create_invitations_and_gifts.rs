//! Migration to create the invitations and gifts tables.
//!
//! Both tables use composite primary keys: an invitation is unique per
//! (guest, event) and a gift record per (household, event).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invitations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invitations::GuestId).uuid().not_null())
                    .col(ColumnDef::new(Invitations::EventId).uuid().not_null())
                    .col(ColumnDef::new(Invitations::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Invitations::Rsvp)
                            .text()
                            .not_null()
                            .default("Not Invited"),
                    )
                    .col(
                        ColumnDef::new(Invitations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Invitations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Invitations::GuestId)
                            .col(Invitations::EventId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invitations_guest_id")
                            .from(Invitations::Table, Invitations::GuestId)
                            .to(Guests::Table, Guests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invitations_event_id")
                            .from(Invitations::Table, Invitations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invitations_user_id")
                    .table(Invitations::Table)
                    .col(Invitations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Gifts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Gifts::HouseholdId).uuid().not_null())
                    .col(ColumnDef::new(Gifts::EventId).uuid().not_null())
                    .col(ColumnDef::new(Gifts::Description).text().null())
                    .col(
                        ColumnDef::new(Gifts::ThankYou)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Gifts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Gifts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(Index::create().col(Gifts::HouseholdId).col(Gifts::EventId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gifts_household_id")
                            .from(Gifts::Table, Gifts::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gifts_event_id")
                            .from(Gifts::Table, Gifts::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gifts::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invitations_user_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invitations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Invitations {
    Table,
    GuestId,
    EventId,
    UserId,
    Rsvp,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Gifts {
    Table,
    HouseholdId,
    EventId,
    Description,
    ThankYou,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Guests {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Households {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
}
