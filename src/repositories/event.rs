//! # Event Repository

use crate::error::RepositoryError;
use crate::models::event::{
    ActiveModel as EventActiveModel, Column as EventColumn, Entity as Event, Model as EventModel,
};
use crate::models::inputs::EventInput;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::{clean_optional, timestamp_now};

/// Repository for Event database operations
pub struct EventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &EventInput,
    ) -> Result<EventModel, RepositoryError> {
        let now = timestamp_now();
        let event = EventActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name.trim().to_string()),
            date: Set(input.date),
            start_time: Set(clean_optional(input.start_time.as_deref())),
            end_time: Set(clean_optional(input.end_time.as_deref())),
            venue: Set(clean_optional(input.venue.as_deref())),
            attire: Set(clean_optional(input.attire.as_deref())),
            description: Set(clean_optional(input.description.as_deref())),
            collect_rsvp: Set(input.collect_rsvp),
            created_at: Set(now),
            updated_at: Set(now),
        };

        event
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventModel>, RepositoryError> {
        Event::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Events of a user in calendar order
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<EventModel>, RepositoryError> {
        Event::find()
            .filter(EventColumn::UserId.eq(user_id))
            .order_by_asc(EventColumn::Date)
            .order_by_asc(EventColumn::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<EventModel>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Event::find()
            .filter(EventColumn::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Overwrite the editable columns of an event
    pub async fn update(
        &self,
        event: EventModel,
        input: &EventInput,
    ) -> Result<EventModel, RepositoryError> {
        let mut active = event.into_active_model();
        active.name = Set(input.name.trim().to_string());
        active.date = Set(input.date);
        active.start_time = Set(clean_optional(input.start_time.as_deref()));
        active.end_time = Set(clean_optional(input.end_time.as_deref()));
        active.venue = Set(clean_optional(input.venue.as_deref()));
        active.attire = Set(clean_optional(input.attire.as_deref()));
        active.description = Set(clean_optional(input.description.as_deref()));
        active.collect_rsvp = Set(input.collect_rsvp);
        active.updated_at = Set(timestamp_now());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        Event::delete_by_id(id)
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }
}
