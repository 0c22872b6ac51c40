//! # Dashboard
//!
//! One aggregate read for the couple's overview page. Independent fetches
//! run concurrently; the results are stitched together in memory.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::views::{
    AnswerView, EventView, HouseholdView, QuestionView, TagView, UserView, WebsiteView,
};
use crate::models::{RsvpStatus, invitation};
use crate::repositories::{
    AnswerRepository, InvitationRepository, UserRepository, WebsiteRepository,
};
use crate::services::household::assemble_households;
use crate::services::{EventService, GuestTagService, HouseholdService, QuestionService};

/// Invitation counts for one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RsvpTally {
    pub attending: u32,
    pub declined: u32,
    pub invited: u32,
    pub not_invited: u32,
}

impl RsvpTally {
    fn count(&mut self, status: RsvpStatus) {
        match status {
            RsvpStatus::Attending => self.attending += 1,
            RsvpStatus::Declined => self.declined += 1,
            RsvpStatus::Invited => self.invited += 1,
            RsvpStatus::NotInvited => self.not_invited += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventOverview {
    #[serde(flatten)]
    pub event: EventView,
    pub rsvp: RsvpTally,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GuestTotals {
    pub households: usize,
    pub guests: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardOverview {
    pub user: UserView,
    pub website: WebsiteView,
    pub households: Vec<HouseholdView>,
    pub events: Vec<EventOverview>,
    pub website_questions: Vec<QuestionView>,
    pub tags: Vec<TagView>,
    pub totals: GuestTotals,
}

pub struct DashboardService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DashboardService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Build the overview, or `None` when the user has not onboarded yet
    pub async fn overview(&self, user_id: Uuid) -> Result<Option<DashboardOverview>, ApiError> {
        let households = HouseholdService::new(self.db);
        let invitations = InvitationRepository::new(self.db);
        let events = EventService::new(self.db);
        let users = UserRepository::new(self.db);
        let websites = WebsiteRepository::new(self.db);
        let tags = GuestTagService::new(self.db);

        let (records, invitations, events, user, website, tags) = tokio::join!(
            households.load_records(user_id),
            invitations.list_by_user(user_id),
            events.list(user_id),
            users.find_by_id(user_id),
            websites.find_by_user(user_id),
            tags.list(user_id),
        );

        let (Some(user), Some(website)) = (user?, website?) else {
            tracing::debug!(%user_id, "Dashboard requested before onboarding");
            return Ok(None);
        };
        let (records, invitations, events, tags) = (records?, invitations?, events?, tags?);

        let mut tallies = tally_invitations(&invitations);
        let households = assemble_households(records, invitations);
        let totals = GuestTotals {
            households: households.len(),
            guests: households.iter().map(|h| h.guests.len()).sum(),
        };

        let mut event_overviews = Vec::with_capacity(events.len());
        for mut event in events {
            self.attach_recent_answers(&mut event.questions).await?;
            let rsvp = tallies.remove(&event.id).unwrap_or_default();
            event_overviews.push(EventOverview { event, rsvp });
        }

        let mut website_questions = QuestionService::new(self.db)
            .list_for_website(website.id)
            .await?;
        self.attach_recent_answers(&mut website_questions).await?;

        Ok(Some(DashboardOverview {
            user: user.into(),
            website: website.into(),
            households,
            events: event_overviews,
            website_questions,
            tags,
            totals,
        }))
    }

    async fn attach_recent_answers(&self, questions: &mut [QuestionView]) -> Result<(), ApiError> {
        let answers = AnswerRepository::new(self.db);
        for question in questions.iter_mut() {
            question.recent_answer = answers
                .most_recent_answer(question.id)
                .await?
                .map(AnswerView::from);
        }
        Ok(())
    }
}

/// Count invitation statuses per event id
pub fn tally_invitations(invitations: &[invitation::Model]) -> HashMap<Uuid, RsvpTally> {
    let mut tallies: HashMap<Uuid, RsvpTally> = HashMap::new();
    for invitation in invitations {
        tallies
            .entry(invitation.event_id)
            .or_default()
            .count(invitation.status());
    }
    tallies
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn invitation(event_id: Uuid, status: RsvpStatus) -> invitation::Model {
        invitation::Model {
            guest_id: Uuid::new_v4(),
            event_id,
            user_id: Uuid::nil(),
            rsvp: status.as_str().to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn tallies_are_per_event() {
        let (ceremony, brunch) = (Uuid::new_v4(), Uuid::new_v4());
        let invitations = vec![
            invitation(ceremony, RsvpStatus::Attending),
            invitation(ceremony, RsvpStatus::Attending),
            invitation(ceremony, RsvpStatus::Declined),
            invitation(ceremony, RsvpStatus::Invited),
            invitation(brunch, RsvpStatus::NotInvited),
        ];

        let tallies = tally_invitations(&invitations);

        assert_eq!(
            tallies[&ceremony],
            RsvpTally {
                attending: 2,
                declined: 1,
                invited: 1,
                not_invited: 0,
            }
        );
        assert_eq!(tallies[&brunch].not_invited, 1);
        assert_eq!(tallies[&brunch].attending, 0);
    }

    #[test]
    fn event_without_invitations_has_no_tally() {
        assert!(tally_invitations(&[]).is_empty());
    }
}
