//! # Invitation Repository
//!
//! Invitations are keyed by `(guest_id, event_id)` and carry the RSVP status
//! as its display string.

use crate::error::RepositoryError;
use crate::models::RsvpStatus;
use crate::models::invitation::{
    ActiveModel as InvitationActiveModel, Column as InvitationColumn, Entity as Invitation,
    Model as InvitationModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
};
use uuid::Uuid;

use super::timestamp_now;

/// Repository for Invitation database operations
pub struct InvitationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvitationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        guest_id: Uuid,
        event_id: Uuid,
        status: RsvpStatus,
    ) -> Result<InvitationModel, RepositoryError> {
        let now = timestamp_now();
        let invitation = InvitationActiveModel {
            guest_id: Set(guest_id),
            event_id: Set(event_id),
            user_id: Set(user_id),
            rsvp: Set(status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        invitation
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Insert one invitation per `(guest_id, event_id, status)` triple
    pub async fn create_many(
        &self,
        user_id: Uuid,
        rows: impl IntoIterator<Item = (Uuid, Uuid, RsvpStatus)>,
    ) -> Result<(), RepositoryError> {
        let now = timestamp_now();
        let models: Vec<InvitationActiveModel> = rows
            .into_iter()
            .map(|(guest_id, event_id, status)| InvitationActiveModel {
                guest_id: Set(guest_id),
                event_id: Set(event_id),
                user_id: Set(user_id),
                rsvp: Set(status.as_str().to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        if models.is_empty() {
            return Ok(());
        }

        Invitation::insert_many(models)
            .exec_without_returning(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }

    pub async fn find(
        &self,
        guest_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<InvitationModel>, RepositoryError> {
        Invitation::find_by_id((guest_id, event_id))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InvitationModel>, RepositoryError> {
        Invitation::find()
            .filter(InvitationColumn::UserId.eq(user_id))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_by_guests(
        &self,
        guest_ids: &[Uuid],
    ) -> Result<Vec<InvitationModel>, RepositoryError> {
        if guest_ids.is_empty() {
            return Ok(Vec::new());
        }
        Invitation::find()
            .filter(InvitationColumn::GuestId.is_in(guest_ids.iter().copied()))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn set_status(
        &self,
        invitation: InvitationModel,
        status: RsvpStatus,
    ) -> Result<InvitationModel, RepositoryError> {
        let mut active = invitation.into_active_model();
        active.rsvp = Set(status.as_str().to_string());
        active.updated_at = Set(timestamp_now());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete_by_guests(&self, guest_ids: &[Uuid]) -> Result<u64, RepositoryError> {
        if guest_ids.is_empty() {
            return Ok(0);
        }
        let result = Invitation::delete_many()
            .filter(InvitationColumn::GuestId.is_in(guest_ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_event(&self, event_id: Uuid) -> Result<u64, RepositoryError> {
        let result = Invitation::delete_many()
            .filter(InvitationColumn::EventId.eq(event_id))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }
}
