//! # RSVP Wizard
//!
//! Guest-facing lookup for the public RSVP form. A visitor enters a name,
//! gets back the matching household parties and, for each, the ordered
//! list of wizard steps. Clients only track an index into that list.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, forbidden, not_found};
use crate::models::RsvpStatus;
use crate::models::inputs::{RsvpLookupInput, Validate};
use crate::models::views::{EventView, GuestView, QuestionView};
use crate::repositories::InvitationRepository;
use crate::services::guest::guest_views;
use crate::services::website::find_public;
use crate::services::{EventService, GuestService, QuestionService};

/// One screen of the RSVP wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WizardStep {
    FindInvitation,
    ConfirmHousehold,
    EventRsvp {
        #[schema(value_type = String)]
        event_id: Uuid,
    },
    Question {
        #[schema(value_type = String)]
        question_id: Uuid,
        #[schema(value_type = Option<String>)]
        event_id: Option<Uuid>,
    },
    Submit,
    Confirmation,
}

/// A household matched by the lookup, with its wizard plan
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RsvpParty {
    #[schema(value_type = String)]
    pub household_id: Uuid,
    pub guests: Vec<GuestView>,
    /// Events this party can reply to, in step order
    pub events: Vec<EventView>,
    pub steps: Vec<WizardStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RsvpLookup {
    pub parties: Vec<RsvpParty>,
    pub website_questions: Vec<QuestionView>,
}

/// Whether any guest of the party holds a live invitation to `event_id`
fn party_is_invited(guests: &[GuestView], event_id: Uuid) -> bool {
    guests.iter().any(|guest| {
        guest
            .invitations
            .iter()
            .any(|i| i.event_id == event_id && i.rsvp != RsvpStatus::NotInvited)
    })
}

/// Ordered wizard steps for one party.
///
/// Each RSVP-collecting event the party is invited to gets a reply step
/// followed by one step per event question; website questions come last.
pub fn plan_steps(
    events: &[EventView],
    guests: &[GuestView],
    website_questions: &[QuestionView],
) -> Vec<WizardStep> {
    let mut steps = vec![WizardStep::FindInvitation, WizardStep::ConfirmHousehold];

    for event in events
        .iter()
        .filter(|e| e.collect_rsvp && party_is_invited(guests, e.id))
    {
        steps.push(WizardStep::EventRsvp { event_id: event.id });
        steps.extend(event.questions.iter().map(|q| WizardStep::Question {
            question_id: q.id,
            event_id: Some(event.id),
        }));
    }
    steps.extend(website_questions.iter().map(|q| WizardStep::Question {
        question_id: q.id,
        event_id: None,
    }));

    steps.push(WizardStep::Submit);
    steps.push(WizardStep::Confirmation);
    steps
}

pub struct RsvpWizardService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RsvpWizardService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn lookup(
        &self,
        sub_url: &str,
        password: Option<&str>,
        input: &RsvpLookupInput,
    ) -> Result<RsvpLookup, ApiError> {
        input.validate()?;

        let website = find_public(self.db, sub_url, password).await?;
        if !website.is_rsvp_enabled {
            return Err(forbidden(Some("RSVP is closed for this wedding")));
        }

        let matches = GuestService::new(self.db)
            .lookup_by_name(website.user_id, &input.first_name, &input.last_name)
            .await?;
        if matches.is_empty() {
            return Err(not_found(
                "Guest",
                format!("{} {}", input.first_name.trim(), input.last_name.trim()),
            ));
        }

        // Guests never see the couple's option tallies
        let events: Vec<EventView> = EventService::new(self.db)
            .list(website.user_id)
            .await?
            .into_iter()
            .map(EventView::without_tallies)
            .collect();
        let website_questions: Vec<QuestionView> = QuestionService::new(self.db)
            .list_for_website(website.id)
            .await?
            .into_iter()
            .map(QuestionView::without_tallies)
            .collect();

        let mut seen = HashSet::new();
        let mut parties = Vec::new();
        for household_id in matches.iter().map(|g| g.household_id) {
            if !seen.insert(household_id) {
                continue;
            }
            parties.push(self.party(household_id, &events, &website_questions).await?);
        }

        tracing::debug!(
            sub_url = %website.sub_url,
            parties = parties.len(),
            "RSVP lookup matched"
        );
        Ok(RsvpLookup {
            parties,
            website_questions,
        })
    }

    async fn party(
        &self,
        household_id: Uuid,
        events: &[EventView],
        website_questions: &[QuestionView],
    ) -> Result<RsvpParty, ApiError> {
        let guests = GuestService::new(self.db)
            .find_by_household(household_id)
            .await?;
        let guest_ids: Vec<Uuid> = guests.iter().map(|g| g.id).collect();
        let invitations = InvitationRepository::new(self.db)
            .list_by_guests(&guest_ids)
            .await?;
        // Tags are the couple's private labels
        let guests = guest_views(guests, invitations, Vec::new());

        let steps = plan_steps(events, &guests, website_questions);
        let events = events
            .iter()
            .filter(|e| {
                steps
                    .iter()
                    .any(|s| *s == WizardStep::EventRsvp { event_id: e.id })
            })
            .cloned()
            .collect();

        Ok(RsvpParty {
            household_id,
            guests,
            events,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionType;
    use crate::models::views::InvitationView;

    fn event(collect_rsvp: bool, questions: Vec<QuestionView>) -> EventView {
        EventView {
            id: Uuid::new_v4(),
            name: "Ceremony".to_string(),
            date: None,
            start_time: None,
            end_time: None,
            venue: None,
            attire: None,
            description: None,
            collect_rsvp,
            questions,
        }
    }

    fn question(event_id: Option<Uuid>) -> QuestionView {
        QuestionView {
            id: Uuid::new_v4(),
            event_id,
            website_id: None,
            prompt: "Song request?".to_string(),
            question_type: QuestionType::Text,
            is_required: false,
            per_guest: true,
            options: Vec::new(),
            recent_answer: None,
        }
    }

    fn guest(invitations: &[(Uuid, RsvpStatus)]) -> GuestView {
        let id = Uuid::new_v4();
        GuestView {
            id,
            household_id: Uuid::nil(),
            first_name: "Mia".to_string(),
            last_name: "Chen".to_string(),
            is_primary_contact: true,
            invitations: invitations
                .iter()
                .map(|(event_id, rsvp)| InvitationView {
                    guest_id: id,
                    event_id: *event_id,
                    rsvp: *rsvp,
                })
                .collect(),
            tag_ids: Vec::new(),
        }
    }

    #[test]
    fn invited_events_get_reply_then_question_steps() {
        let mut ceremony = event(true, Vec::new());
        let meal = question(Some(ceremony.id));
        ceremony.questions.push(meal.clone());
        let website_question = question(None);
        let guests = vec![guest(&[(ceremony.id, RsvpStatus::Invited)])];

        let steps = plan_steps(&[ceremony.clone()], &guests, &[website_question.clone()]);

        assert_eq!(
            steps,
            vec![
                WizardStep::FindInvitation,
                WizardStep::ConfirmHousehold,
                WizardStep::EventRsvp {
                    event_id: ceremony.id
                },
                WizardStep::Question {
                    question_id: meal.id,
                    event_id: Some(ceremony.id)
                },
                WizardStep::Question {
                    question_id: website_question.id,
                    event_id: None
                },
                WizardStep::Submit,
                WizardStep::Confirmation,
            ]
        );
    }

    #[test]
    fn uninvited_and_non_collecting_events_are_skipped() {
        let rehearsal = event(true, vec![question(None)]);
        let reception = event(false, Vec::new());
        let guests = vec![
            guest(&[(rehearsal.id, RsvpStatus::NotInvited)]),
            guest(&[(reception.id, RsvpStatus::Attending)]),
        ];

        let steps = plan_steps(&[rehearsal, reception], &guests, &[]);

        assert_eq!(
            steps,
            vec![
                WizardStep::FindInvitation,
                WizardStep::ConfirmHousehold,
                WizardStep::Submit,
                WizardStep::Confirmation,
            ]
        );
    }

    #[test]
    fn one_invited_guest_is_enough() {
        let brunch = event(true, Vec::new());
        let guests = vec![
            guest(&[(brunch.id, RsvpStatus::NotInvited)]),
            guest(&[(brunch.id, RsvpStatus::Declined)]),
        ];

        let steps = plan_steps(&[brunch.clone()], &guests, &[]);
        assert!(steps.contains(&WizardStep::EventRsvp { event_id: brunch.id }));
    }
}
