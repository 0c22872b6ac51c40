//! Test utilities for database testing.
//!
//! In-memory SQLite databases with all migrations applied, plus fixtures for
//! an onboarded couple with events, questions and households.

#![allow(dead_code)]

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;
use wedding_planner::application::HouseholdManagementService;
use wedding_planner::models::inputs::{
    EventInput, GuestInput, GuestInvitationInput, HouseholdInput, OnboardUserInput, OptionInput,
    QuestionInput,
};
use wedding_planner::models::views::{EventView, HouseholdView, QuestionView};
use wedding_planner::models::{QuestionType, RsvpStatus};
use wedding_planner::services::user::OnboardedUser;
use wedding_planner::services::{EventService, QuestionService, UserService};

pub const BASE_URL: &str = "https://weddings.example.com";

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Onboards a couple named Jane and John, returning the user id and website
pub async fn onboard_couple(db: &DatabaseConnection) -> Result<(Uuid, OnboardedUser)> {
    let user_id = Uuid::new_v4();
    let input = OnboardUserInput {
        email: Some("couple@example.com".to_string()),
        groom_first_name: "John".to_string(),
        groom_last_name: "Doe".to_string(),
        bride_first_name: "Jane".to_string(),
        bride_last_name: "Roe".to_string(),
        sub_url: None,
    };
    let onboarded = UserService::new(db).onboard(user_id, &input, BASE_URL).await?;
    Ok((user_id, onboarded))
}

pub async fn create_event(
    db: &DatabaseConnection,
    user_id: Uuid,
    name: &str,
    collect_rsvp: bool,
) -> Result<EventView> {
    let input = EventInput {
        name: name.to_string(),
        date: None,
        start_time: None,
        end_time: None,
        venue: None,
        attire: None,
        description: None,
        collect_rsvp,
    };
    Ok(EventService::new(db).create(user_id, &input).await?)
}

/// Option question on an event, answered per guest
pub async fn create_option_question(
    db: &DatabaseConnection,
    user_id: Uuid,
    event_id: Uuid,
    prompt: &str,
    choices: &[&str],
) -> Result<QuestionView> {
    let input = QuestionInput {
        id: None,
        event_id: Some(event_id),
        website_id: None,
        prompt: prompt.to_string(),
        question_type: QuestionType::Option,
        is_required: true,
        per_guest: true,
        options: choices
            .iter()
            .map(|text| OptionInput {
                id: None,
                text: text.to_string(),
                description: None,
            })
            .collect(),
    };
    Ok(QuestionService::new(db).upsert(user_id, &input).await?)
}

/// Text question on an event, answered by each guest
pub async fn create_guest_text_question(
    db: &DatabaseConnection,
    user_id: Uuid,
    event_id: Uuid,
    prompt: &str,
) -> Result<QuestionView> {
    let input = QuestionInput {
        id: None,
        event_id: Some(event_id),
        website_id: None,
        prompt: prompt.to_string(),
        question_type: QuestionType::Text,
        is_required: false,
        per_guest: true,
        options: Vec::new(),
    };
    Ok(QuestionService::new(db).upsert(user_id, &input).await?)
}

/// Text question on the website, answered once per household
pub async fn create_household_text_question(
    db: &DatabaseConnection,
    user_id: Uuid,
    website_id: Uuid,
    prompt: &str,
) -> Result<QuestionView> {
    let input = QuestionInput {
        id: None,
        event_id: None,
        website_id: Some(website_id),
        prompt: prompt.to_string(),
        question_type: QuestionType::Text,
        is_required: false,
        per_guest: false,
        options: Vec::new(),
    };
    Ok(QuestionService::new(db).upsert(user_id, &input).await?)
}

pub fn guest_input(first: &str, last: &str, invited_to: &[Uuid]) -> GuestInput {
    GuestInput {
        id: None,
        first_name: first.to_string(),
        last_name: last.to_string(),
        is_primary_contact: false,
        invitations: invited_to
            .iter()
            .map(|event_id| GuestInvitationInput {
                event_id: *event_id,
                rsvp: RsvpStatus::Invited,
            })
            .collect(),
        tag_ids: Vec::new(),
    }
}

pub fn household_input(guests: Vec<GuestInput>) -> HouseholdInput {
    HouseholdInput {
        address1: Some("1 Main St".to_string()),
        address2: None,
        city: Some("Springfield".to_string()),
        state: None,
        country: None,
        zip_code: None,
        phone: None,
        email: None,
        notes: None,
        guests,
        gifts: Vec::new(),
        deleted_guests: Vec::new(),
    }
}

pub async fn create_household(
    db: &DatabaseConnection,
    user_id: Uuid,
    guests: Vec<GuestInput>,
) -> Result<HouseholdView> {
    Ok(HouseholdManagementService::new(db)
        .create(user_id, &household_input(guests))
        .await?)
}
