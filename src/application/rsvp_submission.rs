//! # RSVP Submission
//!
//! Records a visitor's replies and question answers for one wedding website.
//! Everything happens inside a single database transaction: an unknown
//! invitation, a foreign guest or a bad option rolls the whole submission
//! back.
//!
//! Option answers keep `question_options.response_count` equal to the number
//! of option responses pointing at each option: a first answer increments
//! the chosen option, switching moves one count from the old option to the
//! new one, and re-submitting the same choice changes nothing.

use metrics::counter;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, forbidden, not_found};
use crate::models::inputs::{
    AnswerInput, FieldErrors, Respondent, RsvpResponseInput, RsvpSubmissionInput, Validate,
};
use crate::models::{QuestionType, RsvpStatus, question};
use crate::repositories::{
    AnswerRepository, EventRepository, GuestRepository, HouseholdRepository, InvitationRepository,
    QuestionRepository,
};
use crate::services::ensure_owned;
use crate::services::website::find_public;

/// Summary returned to the visitor after a successful submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionReceipt {
    pub responses_recorded: usize,
    pub answers_recorded: usize,
    /// Option answers that were created or switched to another option
    pub option_changes: usize,
}

/// Effect of recording one option answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOutcome {
    Created,
    Changed { from: Uuid },
    Unchanged,
}

pub struct RsvpSubmissionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RsvpSubmissionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submit replies and answers for the website at `sub_url`
    pub async fn submit(
        &self,
        sub_url: &str,
        password: Option<&str>,
        input: &RsvpSubmissionInput,
    ) -> Result<SubmissionReceipt, ApiError> {
        input.validate()?;

        let website = find_public(self.db, sub_url, password).await?;
        if !website.is_rsvp_enabled {
            return Err(forbidden(Some("RSVP is closed for this wedding")));
        }

        let txn = self.db.begin().await?;
        let receipt = record_submission(&txn, website.user_id, input).await?;
        txn.commit().await?;

        counter!("rsvp_submissions_total").increment(1);
        counter!("rsvp_option_changes_total").increment(receipt.option_changes as u64);
        info!(
            user_id = %website.user_id,
            sub_url = %website.sub_url,
            responses = receipt.responses_recorded,
            answers = receipt.answers_recorded,
            "Recorded RSVP submission"
        );
        Ok(receipt)
    }
}

/// Apply a validated submission on `db` for the wedding owned by `user_id`
pub async fn record_submission<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    input: &RsvpSubmissionInput,
) -> Result<SubmissionReceipt, ApiError> {
    let mut receipt = SubmissionReceipt::default();

    for response in &input.responses {
        record_response(db, user_id, response).await?;
        receipt.responses_recorded += 1;
    }

    for answer in &input.answers {
        if record_answer(db, user_id, answer).await? {
            receipt.option_changes += 1;
        }
        receipt.answers_recorded += 1;
    }

    Ok(receipt)
}

async fn record_response<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    response: &RsvpResponseInput,
) -> Result<(), ApiError> {
    let guest = GuestRepository::new(db).find_by_id(response.guest_id).await?;
    ensure_owned(guest, |g| g.user_id, user_id, "Guest", response.guest_id)?;

    let invitations = InvitationRepository::new(db);
    let invitation = invitations
        .find(response.guest_id, response.event_id)
        .await?
        .ok_or_else(|| {
            not_found(
                "Invitation",
                format!("{}/{}", response.guest_id, response.event_id),
            )
        })?;
    if invitation.user_id != user_id {
        return Err(forbidden(Some("Invitation does not belong to this wedding")));
    }
    if invitation.status() == RsvpStatus::NotInvited {
        return Err(forbidden(Some("Guest is not invited to this event")));
    }
    let event = EventRepository::new(db).find_by_id(response.event_id).await?;
    let event = ensure_owned(event, |e| e.user_id, user_id, "Event", response.event_id)?;
    if !event.collect_rsvp {
        return Err(forbidden(Some("This event does not collect RSVPs")));
    }

    invitations.set_status(invitation, response.rsvp).await?;
    debug!(
        guest_id = %response.guest_id,
        event_id = %response.event_id,
        rsvp = %response.rsvp,
        "Updated RSVP"
    );
    Ok(())
}

/// Returns true when an option answer was created or switched
async fn record_answer<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    answer: &AnswerInput,
) -> Result<bool, ApiError> {
    let question = QuestionRepository::new(db)
        .find_by_id(answer.question_id)
        .await?;
    let question = ensure_owned(
        question,
        |q| q.user_id,
        user_id,
        "Question",
        answer.question_id,
    )?;
    if question.kind() != answer.question_type {
        return Err(answer_error(
            "question_type",
            format!("question {} expects a {} answer", question.id, question.kind()),
        ));
    }

    let respondent = answer.respondent().ok_or_else(|| {
        answer_error(
            "guest_id",
            "exactly one of guest_id or household_id must be provided",
        )
    })?;
    ensure_respondent(db, user_id, &question, respondent).await?;

    match answer.question_type {
        QuestionType::Text => {
            let response = answer.response.as_deref().unwrap_or_default();
            AnswerRepository::new(db)
                .upsert_answer(question.id, respondent, response)
                .await?;
            Ok(false)
        }
        QuestionType::Option => {
            let option_id = answer
                .option_id
                .ok_or_else(|| answer_error("option_id", "is required"))?;
            let option = QuestionRepository::new(db)
                .find_option(option_id)
                .await?
                .ok_or_else(|| not_found("Option", option_id))?;
            if option.question_id != question.id {
                return Err(answer_error(
                    "option_id",
                    format!("option {option_id} does not belong to question {}", question.id),
                ));
            }

            let outcome = record_option_answer(db, question.id, option_id, respondent).await?;
            Ok(outcome != OptionOutcome::Unchanged)
        }
    }
}

/// Record a selected option, keeping response counts in step
pub async fn record_option_answer<C: ConnectionTrait>(
    db: &C,
    question_id: Uuid,
    option_id: Uuid,
    respondent: Respondent,
) -> Result<OptionOutcome, ApiError> {
    let answers = AnswerRepository::new(db);
    let options = QuestionRepository::new(db);

    match answers.find_option_response(question_id, respondent).await? {
        None => {
            answers
                .create_option_response(question_id, option_id, respondent)
                .await?;
            options.increment_option(option_id).await?;
            Ok(OptionOutcome::Created)
        }
        Some(existing) if existing.option_id == option_id => Ok(OptionOutcome::Unchanged),
        Some(existing) => {
            let from = existing.option_id;
            answers.change_option_response(existing, option_id).await?;
            options.decrement_option(from).await?;
            options.increment_option(option_id).await?;
            debug!(%question_id, %from, to = %option_id, "Changed option answer");
            Ok(OptionOutcome::Changed { from })
        }
    }
}

async fn ensure_respondent<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    question: &question::Model,
    respondent: Respondent,
) -> Result<(), ApiError> {
    match respondent {
        Respondent::Guest(guest_id) => {
            if !question.per_guest {
                return Err(answer_error(
                    "household_id",
                    "this question is answered once per household",
                ));
            }
            let guest = GuestRepository::new(db).find_by_id(guest_id).await?;
            ensure_owned(guest, |g| g.user_id, user_id, "Guest", guest_id)?;
        }
        Respondent::Household(household_id) => {
            if question.per_guest {
                return Err(answer_error("guest_id", "this question is answered per guest"));
            }
            let household = HouseholdRepository::new(db).find_by_id(household_id).await?;
            ensure_owned(household, |h| h.user_id, user_id, "Household", household_id)?;
        }
    }
    Ok(())
}

fn answer_error(field: &str, message: impl Into<String>) -> ApiError {
    let mut errors = FieldErrors::new();
    errors.add(format!("answers.{field}"), message);
    errors.into()
}
