//! Migration to create the answers and option_responses tables.
//!
//! Each row is owned by either a guest or a household; the other column is
//! NULL. Uniqueness per (question, guest-or-household) is enforced by the
//! RSVP submission upsert.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Answers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Answers::QuestionId).uuid().not_null())
                    .col(ColumnDef::new(Answers::GuestId).uuid().null())
                    .col(ColumnDef::new(Answers::HouseholdId).uuid().null())
                    .col(ColumnDef::new(Answers::Response).text().not_null())
                    .col(
                        ColumnDef::new(Answers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Answers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_answers_question_id")
                            .from(Answers::Table, Answers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OptionResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OptionResponses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OptionResponses::QuestionId).uuid().not_null())
                    .col(ColumnDef::new(OptionResponses::OptionId).uuid().not_null())
                    .col(ColumnDef::new(OptionResponses::GuestId).uuid().null())
                    .col(ColumnDef::new(OptionResponses::HouseholdId).uuid().null())
                    .col(
                        ColumnDef::new(OptionResponses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(OptionResponses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_option_responses_question_id")
                            .from(OptionResponses::Table, OptionResponses::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_option_responses_option_id")
                            .from(OptionResponses::Table, OptionResponses::OptionId)
                            .to(QuestionOptions::Table, QuestionOptions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_answers_question_respondent")
                    .table(Answers::Table)
                    .col(Answers::QuestionId)
                    .col(Answers::GuestId)
                    .col(Answers::HouseholdId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_option_responses_question_respondent")
                    .table(OptionResponses::Table)
                    .col(OptionResponses::QuestionId)
                    .col(OptionResponses::GuestId)
                    .col(OptionResponses::HouseholdId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OptionResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Answers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Answers {
    Table,
    Id,
    QuestionId,
    GuestId,
    HouseholdId,
    Response,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OptionResponses {
    Table,
    Id,
    QuestionId,
    OptionId,
    GuestId,
    HouseholdId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Questions {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum QuestionOptions {
    Table,
    Id,
}
