//! # Guest Service

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::views::{GuestView, InvitationView};
use crate::models::{guest, guest_tag_assignment, invitation};
use crate::repositories::{GuestRepository, GuestTagRepository, InvitationRepository};

pub struct GuestService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GuestService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// All guests of a user with their invitations and tag ids
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<GuestView>, ApiError> {
        let guests = GuestRepository::new(self.db).list_by_user(user_id).await?;
        let ids: Vec<Uuid> = guests.iter().map(|g| g.id).collect();
        let invitations = InvitationRepository::new(self.db)
            .list_by_guests(&ids)
            .await?;
        let assignments = GuestTagRepository::new(self.db)
            .assignments_for_guests(&ids)
            .await?;
        Ok(guest_views(guests, invitations, assignments))
    }

    pub async fn find_by_household(
        &self,
        household_id: Uuid,
    ) -> Result<Vec<guest::Model>, ApiError> {
        Ok(GuestRepository::new(self.db)
            .list_by_household(household_id)
            .await?)
    }

    /// Case-insensitive name search used by the public RSVP form
    pub async fn lookup_by_name(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<guest::Model>, ApiError> {
        Ok(GuestRepository::new(self.db)
            .find_by_name(user_id, first_name, last_name)
            .await?)
    }
}

/// Attach invitations and tag assignments to their guests
pub fn guest_views(
    guests: Vec<guest::Model>,
    invitations: Vec<invitation::Model>,
    assignments: Vec<guest_tag_assignment::Model>,
) -> Vec<GuestView> {
    let mut invitations_by_guest: HashMap<Uuid, Vec<InvitationView>> = HashMap::new();
    for invitation in invitations {
        invitations_by_guest
            .entry(invitation.guest_id)
            .or_default()
            .push(invitation.into());
    }
    let mut tags_by_guest: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for assignment in assignments {
        tags_by_guest
            .entry(assignment.guest_id)
            .or_default()
            .push(assignment.tag_id);
    }

    guests
        .into_iter()
        .map(|guest| {
            let id = guest.id;
            let mut view = GuestView::from(guest);
            view.invitations = invitations_by_guest.remove(&id).unwrap_or_default();
            view.tag_ids = tags_by_guest.remove(&id).unwrap_or_default();
            view
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RsvpStatus;
    use chrono::Utc;

    fn guest(household_id: Uuid) -> guest::Model {
        guest::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            household_id,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            is_primary_contact: true,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn views_merge_invitations_and_tags_by_guest() {
        let household = Uuid::new_v4();
        let (a, b) = (guest(household), guest(household));
        let event = Uuid::new_v4();
        let tag = Uuid::new_v4();

        let invitations = vec![invitation::Model {
            guest_id: b.id,
            event_id: event,
            user_id: Uuid::nil(),
            rsvp: RsvpStatus::Attending.as_str().to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }];
        let assignments = vec![guest_tag_assignment::Model {
            guest_id: a.id,
            tag_id: tag,
            created_at: Utc::now().into(),
        }];

        let views = guest_views(vec![a.clone(), b.clone()], invitations, assignments);

        assert_eq!(views[0].id, a.id);
        assert!(views[0].invitations.is_empty());
        assert_eq!(views[0].tag_ids, vec![tag]);
        assert_eq!(views[1].invitations.len(), 1);
        assert_eq!(views[1].invitations[0].rsvp, RsvpStatus::Attending);
        assert!(views[1].tag_ids.is_empty());
    }
}
