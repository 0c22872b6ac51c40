//! # Household Service
//!
//! Read paths and ownership guards for households. Multi-table writes live
//! in [`crate::application::household_management`].

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::views::{GiftView, HouseholdView};
use crate::models::{gift, guest, guest_tag_assignment, household, invitation};
use crate::repositories::{
    GiftRepository, GuestRepository, GuestTagRepository, HouseholdRepository, InvitationRepository,
};
use crate::services::ensure_owned;
use crate::services::guest::guest_views;

/// Everything needed to render households except invitations
#[derive(Debug, Default, Clone)]
pub struct HouseholdRecords {
    pub households: Vec<household::Model>,
    pub guests: Vec<guest::Model>,
    pub gifts: Vec<gift::Model>,
    pub assignments: Vec<guest_tag_assignment::Model>,
}

pub struct HouseholdService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HouseholdService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_owned(
        &self,
        user_id: Uuid,
        household_id: Uuid,
    ) -> Result<household::Model, ApiError> {
        let household = HouseholdRepository::new(self.db)
            .find_by_id(household_id)
            .await?;
        ensure_owned(household, |h| h.user_id, user_id, "Household", household_id)
    }

    /// Households, guests, gifts and tag assignments of a user
    pub async fn load_records(&self, user_id: Uuid) -> Result<HouseholdRecords, ApiError> {
        let households = HouseholdRepository::new(self.db)
            .list_by_user(user_id)
            .await?;
        let guests = GuestRepository::new(self.db).list_by_user(user_id).await?;
        self.records_for(households, guests).await
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<HouseholdView>, ApiError> {
        let records = self.load_records(user_id).await?;
        let invitations = InvitationRepository::new(self.db)
            .list_by_user(user_id)
            .await?;
        Ok(assemble_households(records, invitations))
    }

    pub async fn get(&self, user_id: Uuid, household_id: Uuid) -> Result<HouseholdView, ApiError> {
        let household = self.get_owned(user_id, household_id).await?;
        let guests = GuestRepository::new(self.db)
            .list_by_household(household_id)
            .await?;
        let guest_ids: Vec<Uuid> = guests.iter().map(|g| g.id).collect();
        let invitations = InvitationRepository::new(self.db)
            .list_by_guests(&guest_ids)
            .await?;
        let records = self.records_for(vec![household], guests).await?;

        assemble_households(records, invitations)
            .pop()
            .ok_or_else(|| crate::error::internal_error("Household could not be assembled"))
    }

    async fn records_for(
        &self,
        households: Vec<household::Model>,
        guests: Vec<guest::Model>,
    ) -> Result<HouseholdRecords, ApiError> {
        let household_ids: Vec<Uuid> = households.iter().map(|h| h.id).collect();
        let guest_ids: Vec<Uuid> = guests.iter().map(|g| g.id).collect();
        let gifts = GiftRepository::new(self.db)
            .list_by_households(&household_ids)
            .await?;
        let assignments = GuestTagRepository::new(self.db)
            .assignments_for_guests(&guest_ids)
            .await?;

        Ok(HouseholdRecords {
            households,
            guests,
            gifts,
            assignments,
        })
    }
}

/// Nest guests (with their invitations and tags) and gifts under households.
///
/// Household order is preserved. Within a household the primary contact
/// comes first, the rest keep their incoming order.
pub fn assemble_households(
    records: HouseholdRecords,
    invitations: Vec<invitation::Model>,
) -> Vec<HouseholdView> {
    let HouseholdRecords {
        households,
        guests,
        gifts,
        assignments,
    } = records;

    let mut guests_by_household: HashMap<Uuid, Vec<_>> = HashMap::new();
    for view in guest_views(guests, invitations, assignments) {
        guests_by_household
            .entry(view.household_id)
            .or_default()
            .push(view);
    }
    let mut gifts_by_household: HashMap<Uuid, Vec<GiftView>> = HashMap::new();
    for gift in gifts {
        gifts_by_household
            .entry(gift.household_id)
            .or_default()
            .push(gift.into());
    }

    households
        .into_iter()
        .map(|household| {
            let id = household.id;
            let mut view = HouseholdView::from(household);
            let mut guests = guests_by_household.remove(&id).unwrap_or_default();
            guests.sort_by_key(|g| !g.is_primary_contact);
            view.guests = guests;
            view.gifts = gifts_by_household.remove(&id).unwrap_or_default();
            view
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RsvpStatus;
    use chrono::Utc;

    fn household(user_id: Uuid) -> household::Model {
        household::Model {
            id: Uuid::new_v4(),
            user_id,
            address1: None,
            address2: None,
            city: Some("Portland".to_string()),
            state: None,
            country: None,
            zip_code: None,
            phone: None,
            email: None,
            notes: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn guest(household_id: Uuid, first_name: &str, primary: bool) -> guest::Model {
        guest::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            household_id,
            first_name: first_name.to_string(),
            last_name: "Rivera".to_string(),
            is_primary_contact: primary,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn guests_and_gifts_land_in_their_household() {
        let (h1, h2) = (household(Uuid::nil()), household(Uuid::nil()));
        let a = guest(h1.id, "Ana", false);
        let b = guest(h1.id, "Bo", true);
        let c = guest(h2.id, "Cy", true);
        let event_id = Uuid::new_v4();

        let records = HouseholdRecords {
            households: vec![h1.clone(), h2.clone()],
            guests: vec![a.clone(), b.clone(), c.clone()],
            gifts: vec![gift::Model {
                household_id: h2.id,
                event_id,
                description: Some("Toaster".to_string()),
                thank_you: false,
                created_at: Utc::now().into(),
                updated_at: Utc::now().into(),
            }],
            assignments: Vec::new(),
        };
        let invitations = vec![invitation::Model {
            guest_id: c.id,
            event_id,
            user_id: Uuid::nil(),
            rsvp: RsvpStatus::Invited.as_str().to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }];

        let views = assemble_households(records, invitations);

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, h1.id);
        let names: Vec<&str> = views[0].guests.iter().map(|g| g.first_name.as_str()).collect();
        assert_eq!(names, vec!["Bo", "Ana"]);
        assert!(views[0].gifts.is_empty());

        assert_eq!(views[1].guests.len(), 1);
        assert_eq!(views[1].guests[0].invitations[0].rsvp, RsvpStatus::Invited);
        assert_eq!(views[1].gifts[0].description.as_deref(), Some("Toaster"));
    }

    #[test]
    fn empty_records_assemble_to_nothing() {
        assert!(assemble_households(HouseholdRecords::default(), Vec::new()).is_empty());
    }
}
