//! Household create/update/delete through the application service.

mod test_utils;

use uuid::Uuid;
use wedding_planner::application::HouseholdManagementService;
use wedding_planner::application::rsvp_submission::record_option_answer;
use wedding_planner::models::RsvpStatus;
use wedding_planner::models::inputs::{GuestInput, GuestInvitationInput, Respondent};
use wedding_planner::services::{EventService, GuestService, HouseholdService, InvitationService};

use test_utils::*;

fn existing(guest: &wedding_planner::models::views::GuestView) -> GuestInput {
    GuestInput {
        id: Some(guest.id),
        first_name: guest.first_name.clone(),
        last_name: guest.last_name.clone(),
        is_primary_contact: guest.is_primary_contact,
        invitations: Vec::new(),
        tag_ids: Vec::new(),
    }
}

#[tokio::test]
async fn new_guests_get_an_invitation_row_for_every_event() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let dinner = create_event(&db, user_id, "Dinner", true).await?;
    let brunch = create_event(&db, user_id, "Brunch", true).await?;

    let household =
        create_household(&db, user_id, vec![guest_input("Ann", "Lee", &[dinner.id])]).await?;

    let invitations = &household.guests[0].invitations;
    assert_eq!(invitations.len(), 2);
    let status_for = |event_id: Uuid| {
        invitations
            .iter()
            .find(|i| i.event_id == event_id)
            .map(|i| i.rsvp)
    };
    assert_eq!(status_for(dinner.id), Some(RsvpStatus::Invited));
    assert_eq!(status_for(brunch.id), Some(RsvpStatus::NotInvited));
    assert!(household.guests[0].is_primary_contact);
    Ok(())
}

#[tokio::test]
async fn deleted_guests_are_removed_with_their_invitations() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let dinner = create_event(&db, user_id, "Dinner", true).await?;
    let household = create_household(
        &db,
        user_id,
        vec![
            guest_input("Ann", "Lee", &[dinner.id]),
            guest_input("Bob", "Lee", &[dinner.id]),
        ],
    )
    .await?;
    let other = create_household(&db, user_id, vec![guest_input("Cy", "Ng", &[dinner.id])]).await?;

    let ann = household
        .guests
        .iter()
        .find(|g| g.first_name == "Ann")
        .unwrap();
    let bob = household
        .guests
        .iter()
        .find(|g| g.first_name == "Bob")
        .unwrap();

    let mut input = household_input(vec![existing(ann)]);
    input.deleted_guests = vec![bob.id];
    let updated = HouseholdManagementService::new(&db)
        .update(user_id, household.id, &input)
        .await?;

    assert_eq!(updated.guests.len(), 1);
    assert_eq!(updated.guests[0].id, ann.id);

    let invitations = InvitationService::new(&db).list(user_id).await?;
    assert!(invitations.iter().all(|i| i.guest_id != bob.id));
    assert!(invitations.iter().any(|i| i.guest_id == ann.id));
    assert!(invitations.iter().any(|i| i.guest_id == other.guests[0].id));

    let guests = GuestService::new(&db).list(user_id).await?;
    assert_eq!(guests.len(), 2);
    Ok(())
}

#[tokio::test]
async fn removing_a_guest_releases_their_option_counts() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let dinner = create_event(&db, user_id, "Dinner", true).await?;
    let meal = create_option_question(&db, user_id, dinner.id, "Meal?", &["Fish", "Beef"]).await?;
    let household = create_household(
        &db,
        user_id,
        vec![
            guest_input("Ann", "Lee", &[dinner.id]),
            guest_input("Bob", "Lee", &[dinner.id]),
        ],
    )
    .await?;
    let fish = meal.options[0].id;
    for guest in &household.guests {
        record_option_answer(&db, meal.id, fish, Respondent::Guest(guest.id)).await?;
    }

    let keep = household.guests.iter().find(|g| g.first_name == "Ann").unwrap();
    let drop = household.guests.iter().find(|g| g.first_name == "Bob").unwrap();
    let mut input = household_input(vec![existing(keep)]);
    input.deleted_guests = vec![drop.id];
    HouseholdManagementService::new(&db)
        .update(user_id, household.id, &input)
        .await?;

    let events = EventService::new(&db).list(user_id).await?;
    let fish_count = events[0].questions[0]
        .options
        .iter()
        .find(|o| o.id == fish)
        .and_then(|o| o.response_count);
    assert_eq!(fish_count, Some(1));

    HouseholdManagementService::new(&db)
        .delete(user_id, household.id)
        .await?;
    let events = EventService::new(&db).list(user_id).await?;
    assert!(
        events[0].questions[0]
            .options
            .iter()
            .all(|o| o.response_count == Some(0))
    );
    assert!(HouseholdService::new(&db).list(user_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn marking_a_new_primary_contact_clears_the_old_one() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let household = create_household(
        &db,
        user_id,
        vec![guest_input("Ann", "Lee", &[]), guest_input("Bob", "Lee", &[])],
    )
    .await?;

    let mut guests: Vec<GuestInput> = household.guests.iter().map(existing).collect();
    for guest in &mut guests {
        guest.is_primary_contact = guest.first_name == "Bob";
    }
    let updated = HouseholdManagementService::new(&db)
        .update(user_id, household.id, &household_input(guests))
        .await?;

    let primaries: Vec<&str> = updated
        .guests
        .iter()
        .filter(|g| g.is_primary_contact)
        .map(|g| g.first_name.as_str())
        .collect();
    assert_eq!(primaries, vec!["Bob"]);
    assert_eq!(updated.guests[0].first_name, "Bob");
    Ok(())
}

#[tokio::test]
async fn a_guest_listed_twice_is_rejected_and_keeps_the_primary_contact() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let household = create_household(&db, user_id, vec![guest_input("Ann", "Lee", &[])]).await?;
    let ann = &household.guests[0];

    let mut first = existing(ann);
    first.is_primary_contact = true;
    let mut second = existing(ann);
    second.is_primary_contact = false;

    let err = HouseholdManagementService::new(&db)
        .update(user_id, household.id, &household_input(vec![first, second]))
        .await
        .unwrap_err();
    assert_eq!(err.status.as_u16(), 400);
    assert!(err.details.as_deref().unwrap()["guests[1].id"].is_string());

    let stored = HouseholdService::new(&db).get(user_id, household.id).await?;
    let primaries = stored
        .guests
        .iter()
        .filter(|g| g.is_primary_contact)
        .count();
    assert_eq!(stored.guests.len(), 1);
    assert_eq!(primaries, 1);
    Ok(())
}

#[tokio::test]
async fn foreign_households_and_events_are_rejected() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let (other_user, _) = onboard_couple(&db).await?;
    let foreign_event = create_event(&db, other_user, "Party", true).await?;
    let foreign_household =
        create_household(&db, other_user, vec![guest_input("Cy", "Ng", &[])]).await?;

    let service = HouseholdManagementService::new(&db);

    let mut guest = guest_input("Ann", "Lee", &[]);
    guest.invitations = vec![GuestInvitationInput {
        event_id: foreign_event.id,
        rsvp: RsvpStatus::Invited,
    }];
    let err = service
        .create(user_id, &household_input(vec![guest]))
        .await
        .unwrap_err();
    assert_eq!(err.status.as_u16(), 403);

    let err = service
        .delete(user_id, foreign_household.id)
        .await
        .unwrap_err();
    assert_eq!(err.status.as_u16(), 403);

    let err = service.delete(user_id, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.status.as_u16(), 404);

    assert!(HouseholdService::new(&db).list(user_id).await?.is_empty());
    Ok(())
}
