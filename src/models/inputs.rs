//! # API Inputs
//!
//! Request payloads accepted by the couple-facing and public procedures,
//! together with the field-level validation each one performs before any
//! database work happens.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{QuestionType, RsvpStatus};

const MAX_NAME_LEN: usize = 255;
const MAX_TEXT_LEN: usize = 4000;

/// Field name to message map reported as `details` on validation failures
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn require_name(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "must not be empty");
        } else if value.len() > MAX_NAME_LEN {
            self.add(field, format!("must be at most {MAX_NAME_LEN} characters"));
        }
    }

    pub fn limit_text(&mut self, field: &str, value: Option<&str>) {
        if value.is_some_and(|v| v.len() > MAX_TEXT_LEN) {
            self.add(field, format!("must be at most {MAX_TEXT_LEN} characters"));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn into_json(self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect(),
        )
    }
}

/// Structural validation of a request payload
pub trait Validate {
    fn validate_fields(&self, errors: &mut FieldErrors);

    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        self.validate_fields(&mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Who an answer or option response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Respondent {
    Guest(Uuid),
    Household(Uuid),
}

impl Respondent {
    pub fn from_columns(guest_id: Option<Uuid>, household_id: Option<Uuid>) -> Option<Self> {
        match (guest_id, household_id) {
            (Some(guest), None) => Some(Respondent::Guest(guest)),
            (None, Some(household)) => Some(Respondent::Household(household)),
            _ => None,
        }
    }

    pub fn guest_id(&self) -> Option<Uuid> {
        match self {
            Respondent::Guest(id) => Some(*id),
            Respondent::Household(_) => None,
        }
    }

    pub fn household_id(&self) -> Option<Uuid> {
        match self {
            Respondent::Guest(_) => None,
            Respondent::Household(id) => Some(*id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OnboardUserInput {
    pub email: Option<String>,
    #[schema(example = "John")]
    pub groom_first_name: String,
    pub groom_last_name: String,
    #[schema(example = "Jane")]
    pub bride_first_name: String,
    pub bride_last_name: String,
    /// Desired website slug; generated from the couple's names when omitted
    pub sub_url: Option<String>,
}

impl Validate for OnboardUserInput {
    fn validate_fields(&self, errors: &mut FieldErrors) {
        errors.require_name("groom_first_name", &self.groom_first_name);
        errors.require_name("groom_last_name", &self.groom_last_name);
        errors.require_name("bride_first_name", &self.bride_first_name);
        errors.require_name("bride_last_name", &self.bride_last_name);
        validate_email(errors, "email", self.email.as_deref());
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub groom_first_name: Option<String>,
    pub groom_last_name: Option<String>,
    pub bride_first_name: Option<String>,
    pub bride_last_name: Option<String>,
}

impl Validate for UpdateUserInput {
    fn validate_fields(&self, errors: &mut FieldErrors) {
        for (field, value) in [
            ("groom_first_name", &self.groom_first_name),
            ("groom_last_name", &self.groom_last_name),
            ("bride_first_name", &self.bride_first_name),
            ("bride_last_name", &self.bride_last_name),
        ] {
            if let Some(value) = value {
                errors.require_name(field, value);
            }
        }
        validate_email(errors, "email", self.email.as_deref());
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateWebsiteInput {
    pub sub_url: Option<String>,
    /// New password; an empty string clears it
    pub password: Option<String>,
    pub is_password_enabled: Option<bool>,
    pub is_rsvp_enabled: Option<bool>,
    /// New cover photo URL; an empty string clears it
    pub cover_photo_url: Option<String>,
}

impl Validate for UpdateWebsiteInput {
    fn validate_fields(&self, errors: &mut FieldErrors) {
        if let Some(password) = &self.password
            && password.len() > MAX_NAME_LEN
        {
            errors.add("password", format!("must be at most {MAX_NAME_LEN} characters"));
        }
        errors.limit_text("cover_photo_url", self.cover_photo_url.as_deref());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventInput {
    #[schema(example = "Ceremony")]
    pub name: String,
    pub date: Option<NaiveDate>,
    #[schema(example = "16:00")]
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub venue: Option<String>,
    pub attire: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub collect_rsvp: bool,
}

impl Validate for EventInput {
    fn validate_fields(&self, errors: &mut FieldErrors) {
        errors.require_name("name", &self.name);
        errors.limit_text("description", self.description.as_deref());
        errors.limit_text("venue", self.venue.as_deref());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptionInput {
    /// Existing option to keep; omitted for new options
    #[schema(value_type = Option<String>)]
    pub id: Option<Uuid>,
    pub text: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionInput {
    /// Existing question to update; omitted to create
    #[schema(value_type = Option<String>)]
    pub id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub event_id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub website_id: Option<Uuid>,
    #[schema(example = "Any dietary restrictions?")]
    pub prompt: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default = "default_per_guest")]
    pub per_guest: bool,
    #[serde(default)]
    pub options: Vec<OptionInput>,
}

fn default_per_guest() -> bool {
    true
}

impl Validate for QuestionInput {
    fn validate_fields(&self, errors: &mut FieldErrors) {
        if self.event_id.is_some() == self.website_id.is_some() {
            errors.add(
                "event_id",
                "exactly one of event_id or website_id must be provided",
            );
        }
        if self.prompt.trim().is_empty() {
            errors.add("prompt", "must not be empty");
        }
        errors.limit_text("prompt", Some(&self.prompt));

        match self.question_type {
            QuestionType::Option => {
                if self.options.len() < 2 {
                    errors.add("options", "option questions need at least 2 options");
                }
                for (index, option) in self.options.iter().enumerate() {
                    errors.require_name(&format!("options[{index}].text"), &option.text);
                }
            }
            QuestionType::Text => {
                if !self.options.is_empty() {
                    errors.add("options", "text questions do not take options");
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuestInvitationInput {
    #[schema(value_type = String)]
    pub event_id: Uuid,
    pub rsvp: RsvpStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuestInput {
    /// Existing guest to update; omitted to add a new party member
    #[schema(value_type = Option<String>)]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_primary_contact: bool,
    #[serde(default)]
    pub invitations: Vec<GuestInvitationInput>,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub tag_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GiftInput {
    #[schema(value_type = String)]
    pub event_id: Uuid,
    pub description: Option<String>,
    #[serde(default)]
    pub thank_you: bool,
}

/// Household with its guest party, used for both create and update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HouseholdInput {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub guests: Vec<GuestInput>,
    #[serde(default)]
    pub gifts: Vec<GiftInput>,
    /// Guests to remove on update; ignored on create
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub deleted_guests: Vec<Uuid>,
}

impl Validate for HouseholdInput {
    fn validate_fields(&self, errors: &mut FieldErrors) {
        if self.guests.is_empty() {
            errors.add("guests", "a household needs at least one guest");
        }
        let mut seen = HashSet::new();
        for (index, guest) in self.guests.iter().enumerate() {
            errors.require_name(&format!("guests[{index}].first_name"), &guest.first_name);
            errors.require_name(&format!("guests[{index}].last_name"), &guest.last_name);
            if let Some(id) = guest.id
                && self.deleted_guests.contains(&id)
            {
                errors.add(
                    format!("guests[{index}].id"),
                    "guest is also listed in deleted_guests",
                );
            }
            if let Some(id) = guest.id
                && !seen.insert(id)
            {
                errors.add(format!("guests[{index}].id"), "guest is listed more than once");
            }
        }
        validate_email(errors, "email", self.email.as_deref());
        errors.limit_text("notes", self.notes.as_deref());
        for (index, gift) in self.gifts.iter().enumerate() {
            errors.limit_text(&format!("gifts[{index}].description"), gift.description.as_deref());
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateInvitationInput {
    pub rsvp: RsvpStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagInput {
    #[schema(example = "Bride's family")]
    pub name: String,
    #[schema(example = "#f4a6c0")]
    pub color: Option<String>,
}

impl Validate for TagInput {
    fn validate_fields(&self, errors: &mut FieldErrors) {
        errors.require_name("name", &self.name);
        if let Some(color) = &self.color {
            let hex = color.strip_prefix('#').unwrap_or("");
            if !(hex.len() == 6 || hex.len() == 3) || !hex.chars().all(|c| c.is_ascii_hexdigit())
            {
                errors.add("color", "must be a hex color such as #a1b2c3");
            }
        }
    }
}

/// Guest name search on a public wedding website
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RsvpLookupInput {
    pub first_name: String,
    pub last_name: String,
}

impl Validate for RsvpLookupInput {
    fn validate_fields(&self, errors: &mut FieldErrors) {
        errors.require_name("first_name", &self.first_name);
        errors.require_name("last_name", &self.last_name);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RsvpResponseInput {
    #[schema(value_type = String)]
    pub event_id: Uuid,
    #[schema(value_type = String)]
    pub guest_id: Uuid,
    pub rsvp: RsvpStatus,
}

/// One answer to a question, from a single guest or a whole household
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerInput {
    #[schema(value_type = String)]
    pub question_id: Uuid,
    pub question_type: QuestionType,
    /// Free text, for text questions
    pub response: Option<String>,
    /// Chosen option, for option questions
    #[schema(value_type = Option<String>)]
    pub option_id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub guest_id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub household_id: Option<Uuid>,
}

impl AnswerInput {
    pub fn respondent(&self) -> Option<Respondent> {
        Respondent::from_columns(self.guest_id, self.household_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RsvpSubmissionInput {
    pub responses: Vec<RsvpResponseInput>,
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

impl Validate for RsvpSubmissionInput {
    fn validate_fields(&self, errors: &mut FieldErrors) {
        if self.responses.is_empty() && self.answers.is_empty() {
            errors.add("responses", "nothing to submit");
        }
        for (index, response) in self.responses.iter().enumerate() {
            if !response.rsvp.is_guest_reply() {
                errors.add(
                    format!("responses[{index}].rsvp"),
                    "must be Attending or Declined",
                );
            }
        }
        for (index, answer) in self.answers.iter().enumerate() {
            if answer.respondent().is_none() {
                errors.add(
                    format!("answers[{index}]"),
                    "exactly one of guest_id or household_id must be provided",
                );
            }
            match answer.question_type {
                QuestionType::Text => {
                    if answer.response.is_none() {
                        errors.add(format!("answers[{index}].response"), "is required");
                    }
                    errors.limit_text(
                        &format!("answers[{index}].response"),
                        answer.response.as_deref(),
                    );
                }
                QuestionType::Option => {
                    if answer.option_id.is_none() {
                        errors.add(format!("answers[{index}].option_id"), "is required");
                    }
                }
            }
        }
    }
}

fn validate_email(errors: &mut FieldErrors, field: &str, email: Option<&str>) {
    let Some(email) = email.filter(|e| !e.is_empty()) else {
        return;
    };
    let mut parts = email.split('@');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && domain.contains('.')
    );
    if !valid {
        errors.add(field, "must be a valid email address");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(first: &str) -> GuestInput {
        GuestInput {
            id: None,
            first_name: first.to_string(),
            last_name: "Smith".to_string(),
            is_primary_contact: false,
            invitations: Vec::new(),
            tag_ids: Vec::new(),
        }
    }

    fn question(kind: QuestionType, options: usize) -> QuestionInput {
        QuestionInput {
            id: None,
            event_id: Some(Uuid::new_v4()),
            website_id: None,
            prompt: "Meal choice?".to_string(),
            question_type: kind,
            is_required: true,
            per_guest: true,
            options: (0..options)
                .map(|i| OptionInput {
                    id: None,
                    text: format!("Option {i}"),
                    description: None,
                })
                .collect(),
        }
    }

    #[test]
    fn option_question_needs_two_options() {
        let errors = question(QuestionType::Option, 1).validate().unwrap_err();
        assert!(errors.contains("options"));
        assert!(question(QuestionType::Option, 2).validate().is_ok());
    }

    #[test]
    fn question_needs_exactly_one_parent() {
        let mut input = question(QuestionType::Text, 0);
        input.website_id = Some(Uuid::new_v4());
        assert!(input.validate().unwrap_err().contains("event_id"));

        input.event_id = None;
        assert!(input.validate().is_ok());

        input.website_id = None;
        assert!(input.validate().is_err());
    }

    #[test]
    fn household_rejects_guest_listed_for_deletion() {
        let id = Uuid::new_v4();
        let mut kept = guest("Ann");
        kept.id = Some(id);
        let input = HouseholdInput {
            address1: None,
            address2: None,
            city: None,
            state: None,
            country: None,
            zip_code: None,
            phone: None,
            email: Some("not-an-email".to_string()),
            notes: None,
            guests: vec![kept, guest(" ")],
            gifts: Vec::new(),
            deleted_guests: vec![id],
        };

        let errors = input.validate().unwrap_err();
        assert!(errors.contains("guests[0].id"));
        assert!(errors.contains("guests[1].first_name"));
        assert!(errors.contains("email"));
    }

    #[test]
    fn rsvp_submission_rejects_couple_only_statuses() {
        let input = RsvpSubmissionInput {
            responses: vec![RsvpResponseInput {
                event_id: Uuid::new_v4(),
                guest_id: Uuid::new_v4(),
                rsvp: RsvpStatus::Invited,
            }],
            answers: vec![AnswerInput {
                question_id: Uuid::new_v4(),
                question_type: QuestionType::Option,
                response: None,
                option_id: None,
                guest_id: Some(Uuid::new_v4()),
                household_id: Some(Uuid::new_v4()),
            }],
        };

        let errors = input.validate().unwrap_err();
        assert!(errors.contains("responses[0].rsvp"));
        assert!(errors.contains("answers[0]"));
        assert!(errors.contains("answers[0].option_id"));
    }

    #[test]
    fn respondent_requires_exactly_one_column() {
        let id = Uuid::new_v4();
        assert_eq!(
            Respondent::from_columns(Some(id), None),
            Some(Respondent::Guest(id))
        );
        assert_eq!(
            Respondent::from_columns(None, Some(id)),
            Some(Respondent::Household(id))
        );
        assert_eq!(Respondent::from_columns(None, None), None);
        assert_eq!(Respondent::from_columns(Some(id), Some(id)), None);
    }

    #[test]
    fn tag_color_must_be_hex() {
        let mut tag = TagInput {
            name: "Family".to_string(),
            color: Some("#12ab9F".to_string()),
        };
        assert!(tag.validate().is_ok());
        tag.color = Some("pink".to_string());
        assert!(tag.validate().unwrap_err().contains("color"));
    }
}
