//! # Question Service
//!
//! RSVP questions attached to either an event or the website. Option
//! questions own their options; removing an option also removes the
//! responses that selected it so response counts stay truthful.

use std::collections::{HashMap, HashSet};

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::{ApiError, not_found};
use crate::models::inputs::{FieldErrors, OptionInput, QuestionInput};
use crate::models::views::QuestionView;
use crate::models::{QuestionType, question, question_option};
use crate::repositories::{
    AnswerRepository, EventRepository, QuestionRepository, WebsiteRepository,
};
use crate::services::ensure_owned;

pub struct QuestionService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QuestionService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Attach options to each question, preserving question order
    pub async fn views_for(
        &self,
        questions: Vec<question::Model>,
    ) -> Result<Vec<QuestionView>, ApiError> {
        let ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
        let mut options_by_question: HashMap<Uuid, Vec<question_option::Model>> = HashMap::new();
        for option in QuestionRepository::new(self.db).list_options(&ids).await? {
            options_by_question
                .entry(option.question_id)
                .or_default()
                .push(option);
        }

        Ok(questions
            .into_iter()
            .map(|q| {
                let options = options_by_question.remove(&q.id).unwrap_or_default();
                QuestionView::new(q, options)
            })
            .collect())
    }

    /// Questions with options, grouped by event id
    pub async fn list_for_events(
        &self,
        event_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<QuestionView>>, ApiError> {
        let questions = QuestionRepository::new(self.db)
            .list_by_events(event_ids)
            .await?;
        let mut grouped: HashMap<Uuid, Vec<QuestionView>> = HashMap::new();
        for view in self.views_for(questions).await? {
            if let Some(event_id) = view.event_id {
                grouped.entry(event_id).or_default().push(view);
            }
        }
        Ok(grouped)
    }

    pub async fn list_for_website(&self, website_id: Uuid) -> Result<Vec<QuestionView>, ApiError> {
        let questions = QuestionRepository::new(self.db)
            .list_by_website(website_id)
            .await?;
        self.views_for(questions).await
    }

    /// Create or update a question and reconcile its options
    pub async fn upsert(
        &self,
        user_id: Uuid,
        input: &QuestionInput,
    ) -> Result<QuestionView, ApiError> {
        self.ensure_parent_owned(user_id, input).await?;

        let repo = QuestionRepository::new(self.db);
        let question = match input.id {
            Some(id) => {
                let existing =
                    ensure_owned(repo.find_by_id(id).await?, |q| q.user_id, user_id, "Question", id)?;
                if existing.kind() != input.question_type {
                    // Answers of the old kind no longer make sense
                    AnswerRepository::new(self.db)
                        .delete_for_questions(&[id])
                        .await?;
                }
                repo.update(existing, input).await?
            }
            None => repo.create(user_id, input).await?,
        };

        let options = self.reconcile_options(&question, input).await?;
        tracing::info!(
            %user_id,
            question_id = %question.id,
            option_count = options.len(),
            "Saved question"
        );
        Ok(QuestionView::new(question, options))
    }

    pub async fn delete(&self, user_id: Uuid, question_id: Uuid) -> Result<(), ApiError> {
        let repo = QuestionRepository::new(self.db);
        ensure_owned(
            repo.find_by_id(question_id).await?,
            |q| q.user_id,
            user_id,
            "Question",
            question_id,
        )?;
        self.delete_questions(&[question_id]).await
    }

    /// Remove questions with their options, answers and option responses
    pub async fn delete_questions(&self, question_ids: &[Uuid]) -> Result<(), ApiError> {
        let repo = QuestionRepository::new(self.db);
        AnswerRepository::new(self.db)
            .delete_for_questions(question_ids)
            .await?;
        repo.delete_options_for_questions(question_ids).await?;
        repo.delete_many(question_ids).await?;
        Ok(())
    }

    async fn ensure_parent_owned(
        &self,
        user_id: Uuid,
        input: &QuestionInput,
    ) -> Result<(), ApiError> {
        match (input.event_id, input.website_id) {
            (Some(event_id), None) => {
                let event = EventRepository::new(self.db).find_by_id(event_id).await?;
                ensure_owned(event, |e| e.user_id, user_id, "Event", event_id)?;
            }
            (None, Some(website_id)) => {
                let website = WebsiteRepository::new(self.db)
                    .find_by_id(website_id)
                    .await?;
                ensure_owned(website, |w| w.user_id, user_id, "Website", website_id)?;
            }
            _ => {
                let mut errors = FieldErrors::new();
                errors.add(
                    "event_id",
                    "exactly one of event_id or website_id must be provided",
                );
                return Err(errors.into());
            }
        }
        Ok(())
    }

    async fn reconcile_options(
        &self,
        question: &question::Model,
        input: &QuestionInput,
    ) -> Result<Vec<question_option::Model>, ApiError> {
        let repo = QuestionRepository::new(self.db);
        let existing = repo.list_options(&[question.id]).await?;
        let wanted: &[OptionInput] = match input.question_type {
            QuestionType::Option => input.options.as_slice(),
            QuestionType::Text => &[],
        };

        let kept: HashSet<Uuid> = wanted.iter().filter_map(|o| o.id).collect();
        let removed: Vec<Uuid> = existing
            .iter()
            .map(|o| o.id)
            .filter(|id| !kept.contains(id))
            .collect();
        if !removed.is_empty() {
            let answers = AnswerRepository::new(self.db);
            let responses = answers.list_option_responses_for_options(&removed).await?;
            let response_ids: Vec<Uuid> = responses.iter().map(|r| r.id).collect();
            answers.delete_option_responses(&response_ids).await?;
            repo.delete_options(&removed).await?;
        }

        let mut by_id: HashMap<Uuid, question_option::Model> =
            existing.into_iter().map(|o| (o.id, o)).collect();
        let mut saved = Vec::with_capacity(wanted.len());
        for option in wanted {
            let model = match option.id {
                Some(id) => {
                    let current = by_id
                        .remove(&id)
                        .ok_or_else(|| not_found("Option", id))?;
                    repo.update_option(current, option).await?
                }
                None => repo.create_option(question.id, option).await?,
            };
            saved.push(model);
        }
        Ok(saved)
    }
}
