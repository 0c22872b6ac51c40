//! # Event Service

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::RsvpStatus;
use crate::models::event;
use crate::models::inputs::EventInput;
use crate::models::views::EventView;
use crate::repositories::{
    EventRepository, GiftRepository, GuestRepository, InvitationRepository, QuestionRepository,
};
use crate::services::{QuestionService, ensure_owned};

pub struct EventService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fetch an event, failing unless it belongs to `user_id`
    pub async fn get_owned(&self, user_id: Uuid, event_id: Uuid) -> Result<event::Model, ApiError> {
        let event = EventRepository::new(self.db).find_by_id(event_id).await?;
        ensure_owned(event, |e| e.user_id, user_id, "Event", event_id)
    }

    /// Events of a user with their questions and options
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<EventView>, ApiError> {
        let events = EventRepository::new(self.db).list_by_user(user_id).await?;
        self.views_for(events).await
    }

    pub async fn views_for(&self, events: Vec<event::Model>) -> Result<Vec<EventView>, ApiError> {
        let ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
        let mut questions = QuestionService::new(self.db).list_for_events(&ids).await?;

        Ok(events
            .into_iter()
            .map(|event| {
                let event_questions = questions.remove(&event.id).unwrap_or_default();
                EventView::new(event, event_questions)
            })
            .collect())
    }

    /// Create an event and a `Not Invited` invitation for every existing guest
    pub async fn create(&self, user_id: Uuid, input: &EventInput) -> Result<EventView, ApiError> {
        let event = EventRepository::new(self.db).create(user_id, input).await?;

        let guests = GuestRepository::new(self.db).list_by_user(user_id).await?;
        let guest_count = guests.len();
        InvitationRepository::new(self.db)
            .create_many(
                user_id,
                guests
                    .into_iter()
                    .map(|guest| (guest.id, event.id, RsvpStatus::NotInvited)),
            )
            .await?;

        tracing::info!(%user_id, event_id = %event.id, guest_count, "Created event");
        Ok(event.into())
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        input: &EventInput,
    ) -> Result<EventView, ApiError> {
        let event = self.get_owned(user_id, event_id).await?;
        let event = EventRepository::new(self.db).update(event, input).await?;

        let mut views = self.views_for(vec![event]).await?;
        views
            .pop()
            .ok_or_else(|| crate::error::internal_error("Updated event could not be reloaded"))
    }

    /// Delete an event with its invitations, gifts and questions
    pub async fn delete(&self, user_id: Uuid, event_id: Uuid) -> Result<(), ApiError> {
        self.get_owned(user_id, event_id).await?;

        let invitations = InvitationRepository::new(self.db)
            .delete_by_event(event_id)
            .await?;
        GiftRepository::new(self.db).delete_by_event(event_id).await?;

        let question_ids: Vec<Uuid> = QuestionRepository::new(self.db)
            .list_by_events(&[event_id])
            .await?
            .into_iter()
            .map(|q| q.id)
            .collect();
        QuestionService::new(self.db)
            .delete_questions(&question_ids)
            .await?;

        EventRepository::new(self.db).delete(event_id).await?;
        tracing::info!(%user_id, %event_id, invitations, "Deleted event");
        Ok(())
    }
}
