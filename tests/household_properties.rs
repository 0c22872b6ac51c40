use chrono::Utc;
use proptest::prelude::*;
use proptest::test_runner::Config;
use uuid::Uuid;
use wedding_planner::application::dashboard::tally_invitations;
use wedding_planner::application::household_management::normalize_primary_contact;
use wedding_planner::models::inputs::GuestInput;
use wedding_planner::models::{RsvpStatus, invitation};

fn party(flags: &[bool]) -> Vec<GuestInput> {
    flags
        .iter()
        .enumerate()
        .map(|(i, primary)| GuestInput {
            id: None,
            first_name: format!("Guest{i}"),
            last_name: "Mensah".to_string(),
            is_primary_contact: *primary,
            invitations: Vec::new(),
            tag_ids: Vec::new(),
        })
        .collect()
}

proptest! {
    #![proptest_config(Config::with_cases(256))]
    #[test]
    fn exactly_one_primary_contact(flags in prop::collection::vec(any::<bool>(), 1..12)) {
        let normalized = normalize_primary_contact(&party(&flags));
        prop_assert_eq!(normalized.len(), flags.len());
        prop_assert_eq!(normalized.iter().filter(|p| **p).count(), 1);

        let expected = flags.iter().position(|p| *p).unwrap_or(0);
        prop_assert!(normalized[expected]);
    }

    #[test]
    fn tallies_account_for_every_invitation(statuses in prop::collection::vec(0_u8..4, 0..40)) {
        let event_id = Uuid::new_v4();
        let invitations: Vec<invitation::Model> = statuses
            .iter()
            .map(|s| {
                let status = match s {
                    0 => RsvpStatus::NotInvited,
                    1 => RsvpStatus::Invited,
                    2 => RsvpStatus::Attending,
                    _ => RsvpStatus::Declined,
                };
                invitation::Model {
                    guest_id: Uuid::new_v4(),
                    event_id,
                    user_id: Uuid::new_v4(),
                    rsvp: status.as_str().to_string(),
                    created_at: Utc::now().into(),
                    updated_at: Utc::now().into(),
                }
            })
            .collect();

        let tally = tally_invitations(&invitations)
            .remove(&event_id)
            .unwrap_or_default();
        let total = tally.attending + tally.declined + tally.invited + tally.not_invited;
        prop_assert_eq!(total as usize, statuses.len());
    }
}
