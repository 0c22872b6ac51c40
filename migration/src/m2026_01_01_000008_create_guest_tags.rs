//! Migration to create the guest_tags and guest_tag_assignments tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuestTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GuestTags::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GuestTags::UserId).uuid().not_null())
                    .col(ColumnDef::new(GuestTags::Name).text().not_null())
                    .col(ColumnDef::new(GuestTags::Color).text().null())
                    .col(
                        ColumnDef::new(GuestTags::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guest_tags_user_id")
                            .from(GuestTags::Table, GuestTags::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guest_tags_user_name")
                    .table(GuestTags::Table)
                    .col(GuestTags::UserId)
                    .col(GuestTags::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GuestTagAssignments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GuestTagAssignments::GuestId).uuid().not_null())
                    .col(ColumnDef::new(GuestTagAssignments::TagId).uuid().not_null())
                    .col(
                        ColumnDef::new(GuestTagAssignments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(GuestTagAssignments::GuestId)
                            .col(GuestTagAssignments::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guest_tag_assignments_guest_id")
                            .from(GuestTagAssignments::Table, GuestTagAssignments::GuestId)
                            .to(Guests::Table, Guests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guest_tag_assignments_tag_id")
                            .from(GuestTagAssignments::Table, GuestTagAssignments::TagId)
                            .to(GuestTags::Table, GuestTags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuestTagAssignments::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_guest_tags_user_name").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GuestTags::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GuestTags {
    Table,
    Id,
    UserId,
    Name,
    Color,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GuestTagAssignments {
    Table,
    GuestId,
    TagId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Guests {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
