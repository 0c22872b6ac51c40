//! # Answer Repository
//!
//! Text answers and option responses. Both are owned by exactly one
//! [`Respondent`]: a guest for per-guest questions, a household otherwise.
//! Lookups match the unused owner column as NULL so a guest answer and a
//! household answer to the same question never collide.

use crate::error::RepositoryError;
use crate::models::answer::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as Answer,
    Model as AnswerModel,
};
use crate::models::inputs::Respondent;
use crate::models::option_response::{
    ActiveModel as OptionResponseActiveModel, Column as OptionResponseColumn,
    Entity as OptionResponse, Model as OptionResponseModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::timestamp_now;

/// Repository for Answer and OptionResponse database operations
pub struct AnswerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

fn answer_owner(respondent: Respondent) -> Condition {
    match respondent {
        Respondent::Guest(id) => Condition::all()
            .add(AnswerColumn::GuestId.eq(id))
            .add(AnswerColumn::HouseholdId.is_null()),
        Respondent::Household(id) => Condition::all()
            .add(AnswerColumn::HouseholdId.eq(id))
            .add(AnswerColumn::GuestId.is_null()),
    }
}

fn option_response_owner(respondent: Respondent) -> Condition {
    match respondent {
        Respondent::Guest(id) => Condition::all()
            .add(OptionResponseColumn::GuestId.eq(id))
            .add(OptionResponseColumn::HouseholdId.is_null()),
        Respondent::Household(id) => Condition::all()
            .add(OptionResponseColumn::HouseholdId.eq(id))
            .add(OptionResponseColumn::GuestId.is_null()),
    }
}

impl<'a, C: ConnectionTrait> AnswerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_answer(
        &self,
        question_id: Uuid,
        respondent: Respondent,
    ) -> Result<Option<AnswerModel>, RepositoryError> {
        Answer::find()
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .filter(answer_owner(respondent))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Create the respondent's answer or overwrite its text
    pub async fn upsert_answer(
        &self,
        question_id: Uuid,
        respondent: Respondent,
        response: &str,
    ) -> Result<AnswerModel, RepositoryError> {
        let now = timestamp_now();
        match self.find_answer(question_id, respondent).await? {
            Some(answer) => {
                let mut active = answer.into_active_model();
                active.response = Set(response.to_string());
                active.updated_at = Set(now);
                active
                    .update(self.db)
                    .await
                    .map_err(RepositoryError::database_error)
            }
            None => AnswerActiveModel {
                id: Set(Uuid::new_v4()),
                question_id: Set(question_id),
                guest_id: Set(respondent.guest_id()),
                household_id: Set(respondent.household_id()),
                response: Set(response.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error),
        }
    }

    /// Most recently written answer to a question, if any
    pub async fn most_recent_answer(
        &self,
        question_id: Uuid,
    ) -> Result<Option<AnswerModel>, RepositoryError> {
        Answer::find()
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .order_by_desc(AnswerColumn::UpdatedAt)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_answers_for_respondents(
        &self,
        guest_ids: &[Uuid],
        household_id: Option<Uuid>,
    ) -> Result<Vec<AnswerModel>, RepositoryError> {
        let mut owners = Condition::any();
        if !guest_ids.is_empty() {
            owners = owners.add(AnswerColumn::GuestId.is_in(guest_ids.iter().copied()));
        }
        if let Some(household_id) = household_id {
            owners = owners.add(AnswerColumn::HouseholdId.eq(household_id));
        }
        if owners.is_empty() {
            return Ok(Vec::new());
        }
        Answer::find()
            .filter(owners)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_option_response(
        &self,
        question_id: Uuid,
        respondent: Respondent,
    ) -> Result<Option<OptionResponseModel>, RepositoryError> {
        OptionResponse::find()
            .filter(OptionResponseColumn::QuestionId.eq(question_id))
            .filter(option_response_owner(respondent))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn create_option_response(
        &self,
        question_id: Uuid,
        option_id: Uuid,
        respondent: Respondent,
    ) -> Result<OptionResponseModel, RepositoryError> {
        let now = timestamp_now();
        OptionResponseActiveModel {
            id: Set(Uuid::new_v4()),
            question_id: Set(question_id),
            option_id: Set(option_id),
            guest_id: Set(respondent.guest_id()),
            household_id: Set(respondent.household_id()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn change_option_response(
        &self,
        response: OptionResponseModel,
        option_id: Uuid,
    ) -> Result<OptionResponseModel, RepositoryError> {
        let mut active = response.into_active_model();
        active.option_id = Set(option_id);
        active.updated_at = Set(timestamp_now());
        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Option responses owned by any of the guests or by the household
    pub async fn list_option_responses_for_respondents(
        &self,
        guest_ids: &[Uuid],
        household_id: Option<Uuid>,
    ) -> Result<Vec<OptionResponseModel>, RepositoryError> {
        let mut owners = Condition::any();
        if !guest_ids.is_empty() {
            owners = owners.add(OptionResponseColumn::GuestId.is_in(guest_ids.iter().copied()));
        }
        if let Some(household_id) = household_id {
            owners = owners.add(OptionResponseColumn::HouseholdId.eq(household_id));
        }
        if owners.is_empty() {
            return Ok(Vec::new());
        }
        OptionResponse::find()
            .filter(owners)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_option_responses_for_options(
        &self,
        option_ids: &[Uuid],
    ) -> Result<Vec<OptionResponseModel>, RepositoryError> {
        if option_ids.is_empty() {
            return Ok(Vec::new());
        }
        OptionResponse::find()
            .filter(OptionResponseColumn::OptionId.is_in(option_ids.iter().copied()))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete_answers(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = Answer::delete_many()
            .filter(AnswerColumn::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }

    pub async fn delete_option_responses(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = OptionResponse::delete_many()
            .filter(OptionResponseColumn::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }

    /// Remove every answer and option response to the given questions
    pub async fn delete_for_questions(&self, question_ids: &[Uuid]) -> Result<(), RepositoryError> {
        if question_ids.is_empty() {
            return Ok(());
        }
        Answer::delete_many()
            .filter(AnswerColumn::QuestionId.is_in(question_ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        OptionResponse::delete_many()
            .filter(OptionResponseColumn::QuestionId.is_in(question_ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }
}
