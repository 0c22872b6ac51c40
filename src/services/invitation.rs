//! # Invitation Service
//!
//! Couple-side invitation management. Unlike guests replying through the
//! website, couples may set any status, including moving a guest back to
//! `Not Invited`.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::RsvpStatus;
use crate::models::views::InvitationView;
use crate::repositories::InvitationRepository;
use crate::services::ensure_owned;

pub struct InvitationService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvitationService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<InvitationView>, ApiError> {
        let invitations = InvitationRepository::new(self.db)
            .list_by_user(user_id)
            .await?;
        Ok(invitations.into_iter().map(InvitationView::from).collect())
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        guest_id: Uuid,
        event_id: Uuid,
        status: RsvpStatus,
    ) -> Result<InvitationView, ApiError> {
        let repo = InvitationRepository::new(self.db);
        let invitation = ensure_owned(
            repo.find(guest_id, event_id).await?,
            |i| i.user_id,
            user_id,
            "Invitation",
            format!("{guest_id}/{event_id}"),
        )?;

        let previous = invitation.status();
        let invitation = repo.set_status(invitation, status).await?;
        tracing::info!(
            %user_id,
            %guest_id,
            %event_id,
            from = %previous,
            to = %status,
            "Updated invitation"
        );
        Ok(invitation.into())
    }
}
