//! Couple-side services: events, questions, guests, website settings and tags.

mod test_utils;

use uuid::Uuid;
use wedding_planner::application::rsvp_submission::record_option_answer;
use wedding_planner::models::inputs::{
    OptionInput, QuestionInput, Respondent, TagInput, UpdateWebsiteInput, Validate,
};
use wedding_planner::models::{QuestionType, RsvpStatus};
use wedding_planner::services::{
    EventService, GuestService, GuestTagService, InvitationService, QuestionService,
    WebsiteService,
};

use test_utils::*;

fn website_settings() -> UpdateWebsiteInput {
    UpdateWebsiteInput {
        sub_url: None,
        password: None,
        is_password_enabled: None,
        is_rsvp_enabled: None,
        cover_photo_url: None,
    }
}

#[tokio::test]
async fn new_events_invite_nobody_by_default() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let household = create_household(&db, user_id, vec![guest_input("Ann", "Lee", &[])]).await?;
    let ann = household.guests[0].id;

    let dinner = create_event(&db, user_id, "Dinner", true).await?;

    let invitations = InvitationService::new(&db).list(user_id).await?;
    let dinner_invite = invitations
        .iter()
        .find(|i| i.guest_id == ann && i.event_id == dinner.id)
        .map(|i| i.rsvp);
    assert_eq!(dinner_invite, Some(RsvpStatus::NotInvited));

    let updated = InvitationService::new(&db)
        .update(user_id, ann, dinner.id, RsvpStatus::Invited)
        .await?;
    assert_eq!(updated.rsvp, RsvpStatus::Invited);
    Ok(())
}

#[tokio::test]
async fn dropping_an_option_discards_its_responses() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let dinner = create_event(&db, user_id, "Dinner", true).await?;
    let meal =
        create_option_question(&db, user_id, dinner.id, "Meal?", &["Fish", "Beef", "Veg"]).await?;
    let household =
        create_household(&db, user_id, vec![guest_input("Ann", "Lee", &[dinner.id])]).await?;

    let veg = meal.options.iter().find(|o| o.text == "Veg").unwrap().id;
    record_option_answer(&db, meal.id, veg, Respondent::Guest(household.guests[0].id)).await?;

    let kept: Vec<OptionInput> = meal
        .options
        .iter()
        .filter(|o| o.id != veg)
        .map(|o| OptionInput {
            id: Some(o.id),
            text: o.text.clone(),
            description: None,
        })
        .collect();
    let input = QuestionInput {
        id: Some(meal.id),
        event_id: Some(dinner.id),
        website_id: None,
        prompt: "Main course?".to_string(),
        question_type: QuestionType::Option,
        is_required: true,
        per_guest: true,
        options: kept,
    };
    let saved = QuestionService::new(&db).upsert(user_id, &input).await?;

    assert_eq!(saved.prompt, "Main course?");
    assert_eq!(saved.options.len(), 2);
    assert!(saved.options.iter().all(|o| o.id != veg));
    assert!(saved.options.iter().all(|o| o.response_count == Some(0)));
    Ok(())
}

#[test]
fn option_questions_need_two_choices_and_one_parent() {
    let input = QuestionInput {
        id: None,
        event_id: Some(Uuid::new_v4()),
        website_id: Some(Uuid::new_v4()),
        prompt: "Meal?".to_string(),
        question_type: QuestionType::Option,
        is_required: true,
        per_guest: true,
        options: vec![OptionInput {
            id: None,
            text: "Fish".to_string(),
            description: None,
        }],
    };

    let errors = input.validate().unwrap_err().into_json();
    assert!(errors.get("event_id").is_some());
    assert!(errors.get("options").is_some());
}

#[tokio::test]
async fn foreign_questions_cannot_be_deleted() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let (other_user, _) = onboard_couple(&db).await?;
    let party = create_event(&db, other_user, "Party", true).await?;
    let question = create_guest_text_question(&db, other_user, party.id, "Song?").await?;

    let err = QuestionService::new(&db)
        .delete(user_id, question.id)
        .await
        .unwrap_err();
    assert_eq!(err.status.as_u16(), 403);

    let err = QuestionService::new(&db)
        .delete(user_id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.status.as_u16(), 404);
    Ok(())
}

#[tokio::test]
async fn guest_lookup_ignores_case_and_stays_within_the_wedding() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let (other_user, _) = onboard_couple(&db).await?;
    create_household(&db, user_id, vec![guest_input("Ann", "Lee", &[])]).await?;
    create_household(&db, other_user, vec![guest_input("Ann", "Lee", &[])]).await?;

    let found = GuestService::new(&db)
        .lookup_by_name(user_id, "  aNN ", "LEE")
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].first_name, "Ann");

    create_household(&db, user_id, vec![guest_input("Élise", "Dubé", &[])]).await?;
    let accented = GuestService::new(&db)
        .lookup_by_name(user_id, "ÉLISE", "dubé")
        .await?;
    assert_eq!(accented.len(), 1);

    let missing = GuestService::new(&db)
        .lookup_by_name(user_id, "Ann", "Smith")
        .await?;
    assert!(missing.is_empty());
    Ok(())
}

#[tokio::test]
async fn website_settings_are_validated() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, onboarded) = onboard_couple(&db).await?;
    let (other_user, _) = onboard_couple(&db).await?;
    let service = WebsiteService::new(&db, BASE_URL);

    let mut input = website_settings();
    input.sub_url = Some("no".to_string());
    let err = service.update(user_id, &input).await.unwrap_err();
    assert_eq!(err.status.as_u16(), 400);

    let mut input = website_settings();
    input.sub_url = Some(onboarded.website.sub_url.clone());
    let err = service.update(other_user, &input).await.unwrap_err();
    assert_eq!(err.status.as_u16(), 409);

    let mut input = website_settings();
    input.is_password_enabled = Some(true);
    let err = service.update(user_id, &input).await.unwrap_err();
    assert_eq!(err.status.as_u16(), 400);

    let mut input = website_settings();
    input.sub_url = Some("Ann-And-Bob-2026".to_string());
    input.is_rsvp_enabled = Some(false);
    let website = service.update(user_id, &input).await?;
    assert_eq!(website.sub_url, "ann-and-bob-2026");
    assert_eq!(website.url, format!("{BASE_URL}/ann-and-bob-2026"));
    assert!(!website.is_rsvp_enabled);
    Ok(())
}

#[tokio::test]
async fn tags_are_private_to_each_couple() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let (other_user, _) = onboard_couple(&db).await?;
    let tags = GuestTagService::new(&db);
    let family = tags
        .create(
            other_user,
            &TagInput {
                name: "Family".to_string(),
                color: None,
            },
        )
        .await?;

    assert!(tags.list(user_id).await?.is_empty());
    let err = tags.delete(user_id, family.id).await.unwrap_err();
    assert_eq!(err.status.as_u16(), 403);

    let mut ann = guest_input("Ann", "Lee", &[]);
    ann.tag_ids = vec![family.id];
    let err = create_household(&db, user_id, vec![ann]).await.unwrap_err();
    let err = err.downcast::<wedding_planner::error::ApiError>()?;
    assert_eq!(err.status.as_u16(), 403);

    tags.delete(other_user, family.id).await?;
    assert!(tags.list(other_user).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn deleting_an_event_drops_its_questions() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, onboarded) = onboard_couple(&db).await?;
    let dinner = create_event(&db, user_id, "Dinner", true).await?;
    create_option_question(&db, user_id, dinner.id, "Meal?", &["Fish", "Beef"]).await?;
    create_household_text_question(&db, user_id, onboarded.website.id, "Song?").await?;

    EventService::new(&db).delete(user_id, dinner.id).await?;

    assert!(EventService::new(&db).list(user_id).await?.is_empty());
    let website_questions = QuestionService::new(&db)
        .list_for_website(onboarded.website.id)
        .await?;
    assert_eq!(website_questions.len(), 1);
    assert_eq!(website_questions[0].prompt, "Song?");
    Ok(())
}
