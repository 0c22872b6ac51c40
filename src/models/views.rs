//! # API Views
//!
//! Serializable response shapes built from the SeaORM models. Handlers and
//! application services return these rather than raw entity models so that
//! secrets (website passwords) never leave the server and nested records
//! can be attached.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    QuestionType, RsvpStatus, answer, event, gift, guest, guest_tag, household, invitation,
    question, question_option, user, website,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub email: Option<String>,
    pub groom_first_name: String,
    pub groom_last_name: String,
    pub bride_first_name: String,
    pub bride_last_name: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl From<user::Model> for UserView {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            groom_first_name: model.groom_first_name,
            groom_last_name: model.groom_last_name,
            bride_first_name: model.bride_first_name,
            bride_last_name: model.bride_last_name,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Website settings as seen by the couple; the password itself is never returned
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebsiteView {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(example = "jane-and-john")]
    pub sub_url: String,
    #[schema(example = "https://weddings.example.com/jane-and-john")]
    pub url: String,
    pub has_password: bool,
    pub is_password_enabled: bool,
    pub is_rsvp_enabled: bool,
    pub cover_photo_url: Option<String>,
}

impl From<website::Model> for WebsiteView {
    fn from(model: website::Model) -> Self {
        Self {
            id: model.id,
            sub_url: model.sub_url,
            url: model.url,
            has_password: model.password.as_deref().is_some_and(|p| !p.is_empty()),
            is_password_enabled: model.is_password_enabled,
            is_rsvp_enabled: model.is_rsvp_enabled,
            cover_photo_url: model.cover_photo_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptionView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub text: String,
    pub description: Option<String>,
    /// How many respondents picked this option; hidden on public views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_count: Option<i32>,
}

impl From<question_option::Model> for OptionView {
    fn from(model: question_option::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            description: model.description,
            response_count: Some(model.response_count),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerView {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub question_id: Uuid,
    #[schema(value_type = Option<String>)]
    pub guest_id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub household_id: Option<Uuid>,
    pub response: String,
    pub updated_at: String,
}

impl From<answer::Model> for AnswerView {
    fn from(model: answer::Model) -> Self {
        Self {
            id: model.id,
            question_id: model.question_id,
            guest_id: model.guest_id,
            household_id: model.household_id,
            response: model.response,
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionView {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = Option<String>)]
    pub event_id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub website_id: Option<Uuid>,
    pub prompt: String,
    pub question_type: QuestionType,
    pub is_required: bool,
    pub per_guest: bool,
    pub options: Vec<OptionView>,
    /// Most recently updated answer, only populated on the dashboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_answer: Option<AnswerView>,
}

impl QuestionView {
    /// Drop option tallies and answers before showing the question to guests
    pub fn without_tallies(mut self) -> Self {
        for option in &mut self.options {
            option.response_count = None;
        }
        self.recent_answer = None;
        self
    }

    pub fn new(model: question::Model, options: Vec<question_option::Model>) -> Self {
        Self {
            question_type: model.kind(),
            id: model.id,
            event_id: model.event_id,
            website_id: model.website_id,
            prompt: model.prompt,
            is_required: model.is_required,
            per_guest: model.per_guest,
            options: options.into_iter().map(OptionView::from).collect(),
            recent_answer: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub venue: Option<String>,
    pub attire: Option<String>,
    pub description: Option<String>,
    pub collect_rsvp: bool,
    pub questions: Vec<QuestionView>,
}

impl EventView {
    pub fn without_tallies(mut self) -> Self {
        self.questions = self
            .questions
            .into_iter()
            .map(QuestionView::without_tallies)
            .collect();
        self
    }

    pub fn new(model: event::Model, questions: Vec<QuestionView>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            date: model.date,
            start_time: model.start_time,
            end_time: model.end_time,
            venue: model.venue,
            attire: model.attire,
            description: model.description,
            collect_rsvp: model.collect_rsvp,
            questions,
        }
    }
}

impl From<event::Model> for EventView {
    fn from(model: event::Model) -> Self {
        Self::new(model, Vec::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvitationView {
    #[schema(value_type = String)]
    pub guest_id: Uuid,
    #[schema(value_type = String)]
    pub event_id: Uuid,
    pub rsvp: RsvpStatus,
}

impl From<invitation::Model> for InvitationView {
    fn from(model: invitation::Model) -> Self {
        Self {
            rsvp: model.status(),
            guest_id: model.guest_id,
            event_id: model.event_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuestView {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub household_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub is_primary_contact: bool,
    pub invitations: Vec<InvitationView>,
    #[schema(value_type = Vec<String>)]
    pub tag_ids: Vec<Uuid>,
}

impl From<guest::Model> for GuestView {
    fn from(model: guest::Model) -> Self {
        Self {
            id: model.id,
            household_id: model.household_id,
            first_name: model.first_name,
            last_name: model.last_name,
            is_primary_contact: model.is_primary_contact,
            invitations: Vec::new(),
            tag_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GiftView {
    #[schema(value_type = String)]
    pub event_id: Uuid,
    pub description: Option<String>,
    pub thank_you: bool,
}

impl From<gift::Model> for GiftView {
    fn from(model: gift::Model) -> Self {
        Self {
            event_id: model.event_id,
            description: model.description,
            thank_you: model.thank_you,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HouseholdView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub guests: Vec<GuestView>,
    pub gifts: Vec<GiftView>,
}

impl From<household::Model> for HouseholdView {
    fn from(model: household::Model) -> Self {
        Self {
            id: model.id,
            address1: model.address1,
            address2: model.address2,
            city: model.city,
            state: model.state,
            country: model.country,
            zip_code: model.zip_code,
            phone: model.phone,
            email: model.email,
            notes: model.notes,
            guests: Vec::new(),
            gifts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
}

impl From<guest_tag::Model> for TagView {
    fn from(model: guest_tag::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color,
        }
    }
}

/// What a visitor sees at `/public/websites/{sub_url}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicWebsiteView {
    #[schema(example = "jane-and-john")]
    pub sub_url: String,
    #[schema(example = "Jane & John")]
    pub couple: String,
    pub cover_photo_url: Option<String>,
    pub is_rsvp_enabled: bool,
    pub events: Vec<EventView>,
}

impl PublicWebsiteView {
    pub fn new(website: website::Model, user: &user::Model, events: Vec<EventView>) -> Self {
        Self {
            sub_url: website.sub_url,
            couple: user.couple_display_name(),
            cover_photo_url: website.cover_photo_url,
            is_rsvp_enabled: website.is_rsvp_enabled,
            events: events.into_iter().map(EventView::without_tallies).collect(),
        }
    }
}
