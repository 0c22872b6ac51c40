//! # Question Repository
//!
//! Questions and their selectable options. Option rows carry a denormalized
//! `response_count` that is only ever adjusted through the atomic
//! increment/decrement helpers here.

use crate::error::RepositoryError;
use crate::models::inputs::{OptionInput, QuestionInput};
use crate::models::question::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Question,
    Model as QuestionModel,
};
use crate::models::question_option::{
    ActiveModel as OptionActiveModel, Column as OptionColumn, Entity as QuestionOption,
    Model as OptionModel,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::{clean_optional, timestamp_now};

/// Repository for Question and Option database operations
pub struct QuestionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QuestionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &QuestionInput,
    ) -> Result<QuestionModel, RepositoryError> {
        let now = timestamp_now();
        let question = QuestionActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            event_id: Set(input.event_id),
            website_id: Set(input.website_id),
            prompt: Set(input.prompt.trim().to_string()),
            question_type: Set(input.question_type.as_str().to_string()),
            is_required: Set(input.is_required),
            per_guest: Set(input.per_guest),
            created_at: Set(now),
            updated_at: Set(now),
        };

        question
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<QuestionModel>, RepositoryError> {
        Question::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<QuestionModel>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Question::find()
            .filter(QuestionColumn::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn update(
        &self,
        question: QuestionModel,
        input: &QuestionInput,
    ) -> Result<QuestionModel, RepositoryError> {
        let mut active = question.into_active_model();
        active.event_id = Set(input.event_id);
        active.website_id = Set(input.website_id);
        active.prompt = Set(input.prompt.trim().to_string());
        active.question_type = Set(input.question_type.as_str().to_string());
        active.is_required = Set(input.is_required);
        active.per_guest = Set(input.per_guest);
        active.updated_at = Set(timestamp_now());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Questions attached to any of the given events, oldest first
    pub async fn list_by_events(
        &self,
        event_ids: &[Uuid],
    ) -> Result<Vec<QuestionModel>, RepositoryError> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        Question::find()
            .filter(QuestionColumn::EventId.is_in(event_ids.iter().copied()))
            .order_by_asc(QuestionColumn::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_by_website(
        &self,
        website_id: Uuid,
    ) -> Result<Vec<QuestionModel>, RepositoryError> {
        Question::find()
            .filter(QuestionColumn::WebsiteId.eq(website_id))
            .order_by_asc(QuestionColumn::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = Question::delete_many()
            .filter(QuestionColumn::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }

    pub async fn create_option(
        &self,
        question_id: Uuid,
        input: &OptionInput,
    ) -> Result<OptionModel, RepositoryError> {
        let now = timestamp_now();
        let option = OptionActiveModel {
            id: Set(Uuid::new_v4()),
            question_id: Set(question_id),
            text: Set(input.text.trim().to_string()),
            description: Set(clean_optional(input.description.as_deref())),
            response_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        option
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Update text and description; the response count is left alone
    pub async fn update_option(
        &self,
        option: OptionModel,
        input: &OptionInput,
    ) -> Result<OptionModel, RepositoryError> {
        let mut active = option.into_active_model();
        active.text = Set(input.text.trim().to_string());
        active.description = Set(clean_optional(input.description.as_deref()));
        active.updated_at = Set(timestamp_now());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_option(&self, id: Uuid) -> Result<Option<OptionModel>, RepositoryError> {
        QuestionOption::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_options(
        &self,
        question_ids: &[Uuid],
    ) -> Result<Vec<OptionModel>, RepositoryError> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }
        QuestionOption::find()
            .filter(OptionColumn::QuestionId.is_in(question_ids.iter().copied()))
            .order_by_asc(OptionColumn::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete_options(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = QuestionOption::delete_many()
            .filter(OptionColumn::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }

    pub async fn delete_options_for_questions(
        &self,
        question_ids: &[Uuid],
    ) -> Result<u64, RepositoryError> {
        if question_ids.is_empty() {
            return Ok(0);
        }
        let result = QuestionOption::delete_many()
            .filter(OptionColumn::QuestionId.is_in(question_ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }

    /// Atomically add one to an option's response count
    pub async fn increment_option(&self, option_id: Uuid) -> Result<(), RepositoryError> {
        let result = QuestionOption::update_many()
            .col_expr(
                OptionColumn::ResponseCount,
                Expr::col(OptionColumn::ResponseCount).add(1),
            )
            .col_expr(OptionColumn::UpdatedAt, Expr::value(timestamp_now()))
            .filter(OptionColumn::Id.eq(option_id))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Option {} not found",
                option_id
            )));
        }
        Ok(())
    }

    /// Atomically subtract one from an option's response count, never below zero
    pub async fn decrement_option(&self, option_id: Uuid) -> Result<(), RepositoryError> {
        QuestionOption::update_many()
            .col_expr(
                OptionColumn::ResponseCount,
                Expr::col(OptionColumn::ResponseCount).sub(1),
            )
            .col_expr(OptionColumn::UpdatedAt, Expr::value(timestamp_now()))
            .filter(OptionColumn::Id.eq(option_id))
            .filter(OptionColumn::ResponseCount.gt(0))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }
}
