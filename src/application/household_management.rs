//! # Household Management
//!
//! Transactional create, update and delete of a household together with its
//! guest party, their invitations and tags, and the household's gifts.
//!
//! Removing a guest also removes their answers and option responses; every
//! removed option response decrements its option's `response_count`.

use std::collections::{HashMap, HashSet};

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, forbidden, not_found};
use crate::models::inputs::{FieldErrors, GuestInput, HouseholdInput, Validate};
use crate::models::views::HouseholdView;
use crate::models::{RsvpStatus, household};
use crate::repositories::{
    AnswerRepository, EventRepository, GiftRepository, GuestRepository, GuestTagRepository,
    HouseholdRepository, InvitationRepository, QuestionRepository,
};
use crate::services::{GuestService, GuestTagService, HouseholdService};

/// Primary-contact flags for a party, in input order.
///
/// Exactly one flag is set for a non-empty party: the first guest marked
/// primary, or the first guest when nobody is.
pub fn normalize_primary_contact(guests: &[GuestInput]) -> Vec<bool> {
    let primary = guests
        .iter()
        .position(|g| g.is_primary_contact)
        .unwrap_or(0);
    (0..guests.len()).map(|index| index == primary).collect()
}

pub struct HouseholdManagementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HouseholdManagementService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &HouseholdInput,
    ) -> Result<HouseholdView, ApiError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        ensure_references_owned(&txn, user_id, input).await?;
        let household = HouseholdRepository::new(&txn).create(user_id, input).await?;
        save_party(&txn, user_id, &household, input).await?;
        let view = HouseholdService::new(&txn).get(user_id, household.id).await?;
        txn.commit().await?;

        info!(
            %user_id,
            household_id = %household.id,
            guests = view.guests.len(),
            "Created household"
        );
        Ok(view)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        household_id: Uuid,
        input: &HouseholdInput,
    ) -> Result<HouseholdView, ApiError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let household = HouseholdService::new(&txn)
            .get_owned(user_id, household_id)
            .await?;
        ensure_references_owned(&txn, user_id, input).await?;

        let deleted = delete_guests(&txn, &household, &input.deleted_guests).await?;
        let household = HouseholdRepository::new(&txn)
            .update_contact(household, input)
            .await?;
        GuestRepository::new(&txn)
            .clear_primary_contacts(household.id)
            .await?;
        save_party(&txn, user_id, &household, input).await?;
        let view = HouseholdService::new(&txn).get(user_id, household.id).await?;
        txn.commit().await?;

        info!(%user_id, %household_id, deleted_guests = deleted, "Updated household");
        Ok(view)
    }

    /// Delete a household and everything hanging off it
    pub async fn delete(&self, user_id: Uuid, household_id: Uuid) -> Result<(), ApiError> {
        let txn = self.db.begin().await?;
        let household = HouseholdService::new(&txn)
            .get_owned(user_id, household_id)
            .await?;

        let guest_ids: Vec<Uuid> = GuestService::new(&txn)
            .find_by_household(household.id)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();
        remove_guests(&txn, &guest_ids).await?;
        remove_responses(&txn, &[], Some(household.id)).await?;
        GiftRepository::new(&txn)
            .delete_by_household(household.id)
            .await?;
        HouseholdRepository::new(&txn).delete(household.id).await?;
        txn.commit().await?;

        info!(%user_id, %household_id, guests = guest_ids.len(), "Deleted household");
        Ok(())
    }
}

/// Events named by invitations or gifts must belong to the caller
async fn ensure_references_owned<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    input: &HouseholdInput,
) -> Result<(), ApiError> {
    let mut event_ids: Vec<Uuid> = input
        .guests
        .iter()
        .flat_map(|g| g.invitations.iter().map(|i| i.event_id))
        .chain(input.gifts.iter().map(|g| g.event_id))
        .collect();
    event_ids.sort_unstable();
    event_ids.dedup();

    let events = EventRepository::new(db).find_by_ids(&event_ids).await?;
    for event_id in &event_ids {
        match events.iter().find(|e| e.id == *event_id) {
            None => return Err(not_found("Event", event_id)),
            Some(event) if event.user_id != user_id => {
                return Err(forbidden(Some("Event does not belong to this wedding")));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Upsert the party, their invitations and tags, then the gifts
async fn save_party<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    household: &household::Model,
    input: &HouseholdInput,
) -> Result<(), ApiError> {
    let guests = GuestRepository::new(db);
    let invitations = InvitationRepository::new(db);
    let tags = GuestTagService::new(db);
    let event_ids: Vec<Uuid> = EventRepository::new(db)
        .list_by_user(user_id)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();

    let primaries = normalize_primary_contact(&input.guests);
    for (index, (guest_input, is_primary)) in input.guests.iter().zip(primaries).enumerate() {
        let requested: HashMap<Uuid, RsvpStatus> = guest_input
            .invitations
            .iter()
            .map(|i| (i.event_id, i.rsvp))
            .collect();

        let guest = match guest_input.id {
            Some(guest_id) => {
                let existing = guests
                    .find_by_id(guest_id)
                    .await?
                    .filter(|g| g.household_id == household.id)
                    .ok_or_else(|| {
                        let mut errors = FieldErrors::new();
                        errors.add(
                            format!("guests[{index}].id"),
                            "guest does not belong to this household",
                        );
                        ApiError::from(errors)
                    })?;
                let guest = guests.update(existing, guest_input, is_primary).await?;

                for (event_id, status) in &requested {
                    match invitations.find(guest.id, *event_id).await? {
                        Some(invitation) => {
                            invitations.set_status(invitation, *status).await?;
                        }
                        None => {
                            invitations
                                .create(user_id, guest.id, *event_id, *status)
                                .await?;
                        }
                    }
                }
                guest
            }
            None => {
                let guest = guests
                    .create(user_id, household.id, guest_input, is_primary)
                    .await?;
                invitations
                    .create_many(
                        user_id,
                        event_ids.iter().map(|event_id| {
                            let status = requested
                                .get(event_id)
                                .copied()
                                .unwrap_or(RsvpStatus::NotInvited);
                            (guest.id, *event_id, status)
                        }),
                    )
                    .await?;
                guest
            }
        };

        tags.assign(user_id, guest.id, &guest_input.tag_ids)
            .await?;
    }

    let gifts = GiftRepository::new(db);
    for gift in &input.gifts {
        gifts.upsert(household.id, gift).await?;
    }
    Ok(())
}

/// Remove the listed guests of `household`; ids from other households are rejected
async fn delete_guests<C: ConnectionTrait>(
    db: &C,
    household: &household::Model,
    guest_ids: &[Uuid],
) -> Result<usize, ApiError> {
    let unique: HashSet<Uuid> = guest_ids.iter().copied().collect();
    let ids: Vec<Uuid> = unique.into_iter().collect();
    let found = GuestRepository::new(db).find_by_ids(&ids).await?;

    for id in &ids {
        match found.iter().find(|g| g.id == *id) {
            None => return Err(not_found("Guest", id)),
            Some(guest) if guest.household_id != household.id => {
                return Err(forbidden(Some("Guest does not belong to this household")));
            }
            Some(_) => {}
        }
    }

    remove_guests(db, &ids).await?;
    Ok(ids.len())
}

async fn remove_guests<C: ConnectionTrait>(db: &C, guest_ids: &[Uuid]) -> Result<(), ApiError> {
    if guest_ids.is_empty() {
        return Ok(());
    }
    remove_responses(db, guest_ids, None).await?;
    InvitationRepository::new(db)
        .delete_by_guests(guest_ids)
        .await?;
    GuestTagRepository::new(db)
        .delete_assignments_for_guests(guest_ids)
        .await?;
    GuestRepository::new(db).delete_many(guest_ids).await?;
    Ok(())
}

/// Delete answers and option responses of the respondents, releasing option counts
async fn remove_responses<C: ConnectionTrait>(
    db: &C,
    guest_ids: &[Uuid],
    household_id: Option<Uuid>,
) -> Result<(), ApiError> {
    let answers = AnswerRepository::new(db);
    let options = QuestionRepository::new(db);

    let responses = answers
        .list_option_responses_for_respondents(guest_ids, household_id)
        .await?;
    for response in &responses {
        options.decrement_option(response.option_id).await?;
    }
    let response_ids: Vec<Uuid> = responses.iter().map(|r| r.id).collect();
    answers.delete_option_responses(&response_ids).await?;

    let answer_ids: Vec<Uuid> = answers
        .list_answers_for_respondents(guest_ids, household_id)
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect();
    answers.delete_answers(&answer_ids).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(flags: &[bool]) -> Vec<GuestInput> {
        flags
            .iter()
            .enumerate()
            .map(|(i, primary)| GuestInput {
                id: None,
                first_name: format!("Guest{i}"),
                last_name: "Okafor".to_string(),
                is_primary_contact: *primary,
                invitations: Vec::new(),
                tag_ids: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn first_guest_becomes_primary_when_none_marked() {
        assert_eq!(normalize_primary_contact(&party(&[false, false])), vec![true, false]);
    }

    #[test]
    fn only_first_marked_guest_stays_primary() {
        assert_eq!(
            normalize_primary_contact(&party(&[false, true, true])),
            vec![false, true, false]
        );
    }

    #[test]
    fn empty_party_has_no_primary() {
        assert!(normalize_primary_contact(&[]).is_empty());
    }
}
