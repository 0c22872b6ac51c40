mod test_utils;

use uuid::Uuid;
use wedding_planner::application::DashboardService;
use wedding_planner::models::inputs::TagInput;
use wedding_planner::services::{EventService, GuestTagService};

use test_utils::*;

#[tokio::test]
async fn dashboard_is_none_until_onboarded() -> anyhow::Result<()> {
    let db = setup_test_db().await?;

    let overview = DashboardService::new(&db).overview(Uuid::new_v4()).await?;
    assert!(overview.is_none());
    Ok(())
}

#[tokio::test]
async fn dashboard_aggregates_the_whole_wedding() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, onboarded) = onboard_couple(&db).await?;
    let dinner = create_event(&db, user_id, "Dinner", true).await?;
    create_event(&db, user_id, "Brunch", false).await?;
    let tag = GuestTagService::new(&db)
        .create(
            user_id,
            &TagInput {
                name: "College".to_string(),
                color: Some("#336699".to_string()),
            },
        )
        .await?;

    let mut ann = guest_input("Ann", "Lee", &[dinner.id]);
    ann.tag_ids = vec![tag.id];
    create_household(&db, user_id, vec![ann, guest_input("Bob", "Lee", &[])]).await?;
    create_household(&db, user_id, vec![guest_input("Cy", "Ng", &[dinner.id])]).await?;

    // Another couple's data never leaks in
    let (other_user, _) = onboard_couple(&db).await?;
    let party = create_event(&db, other_user, "Party", true).await?;
    create_household(&db, other_user, vec![guest_input("Di", "Ox", &[party.id])]).await?;

    let overview = DashboardService::new(&db).overview(user_id).await?.unwrap();

    assert_eq!(overview.user.id, user_id);
    assert_eq!(overview.website.id, onboarded.website.id);
    assert_eq!(overview.totals.households, 2);
    assert_eq!(overview.totals.guests, 3);
    assert_eq!(overview.events.len(), 2);
    assert_eq!(overview.tags.len(), 1);

    let dinner_tally = overview
        .events
        .iter()
        .find(|e| e.event.id == dinner.id)
        .map(|e| e.rsvp)
        .unwrap();
    assert_eq!(dinner_tally.invited, 2);
    assert_eq!(dinner_tally.not_invited, 1);

    let tagged: Vec<&str> = overview
        .households
        .iter()
        .flat_map(|h| h.guests.iter())
        .filter(|g| g.tag_ids.contains(&tag.id))
        .map(|g| g.first_name.as_str())
        .collect();
    assert_eq!(tagged, vec!["Ann"]);
    Ok(())
}

#[tokio::test]
async fn deleting_an_event_removes_its_invitations() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let (user_id, _) = onboard_couple(&db).await?;
    let dinner = create_event(&db, user_id, "Dinner", true).await?;
    let brunch = create_event(&db, user_id, "Brunch", true).await?;
    create_household(&db, user_id, vec![guest_input("Ann", "Lee", &[dinner.id])]).await?;

    EventService::new(&db).delete(user_id, brunch.id).await?;

    let overview = DashboardService::new(&db).overview(user_id).await?.unwrap();
    assert_eq!(overview.events.len(), 1);
    let invitations = &overview.households[0].guests[0].invitations;
    assert_eq!(invitations.len(), 1);
    assert_eq!(invitations[0].event_id, dinner.id);
    Ok(())
}
