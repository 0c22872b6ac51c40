//! Migration to create the websites table.
//!
//! Each user owns at most one public microsite, addressed by a unique `sub_url`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Websites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Websites::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Websites::UserId).uuid().not_null())
                    .col(ColumnDef::new(Websites::SubUrl).text().not_null())
                    .col(ColumnDef::new(Websites::Url).text().not_null())
                    .col(ColumnDef::new(Websites::Password).text().null())
                    .col(
                        ColumnDef::new(Websites::IsPasswordEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Websites::IsRsvpEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Websites::CoverPhotoUrl).text().null())
                    .col(
                        ColumnDef::new(Websites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Websites::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_websites_user_id")
                            .from(Websites::Table, Websites::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_websites_sub_url")
                    .table(Websites::Table)
                    .col(Websites::SubUrl)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_websites_user_id")
                    .table(Websites::Table)
                    .col(Websites::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_websites_sub_url").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_websites_user_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Websites::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Websites {
    Table,
    Id,
    UserId,
    SubUrl,
    Url,
    Password,
    IsPasswordEnabled,
    IsRsvpEnabled,
    CoverPhotoUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
