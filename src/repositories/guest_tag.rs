//! # Guest Tag Repository

use crate::error::RepositoryError;
use crate::models::guest_tag::{
    ActiveModel as GuestTagActiveModel, Column as GuestTagColumn, Entity as GuestTag,
    Model as GuestTagModel,
};
use crate::models::guest_tag_assignment::{
    ActiveModel as AssignmentActiveModel, Column as AssignmentColumn, Entity as GuestTagAssignment,
    Model as AssignmentModel,
};
use crate::models::inputs::TagInput;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{clean_optional, timestamp_now};

/// Repository for GuestTag and GuestTagAssignment database operations
pub struct GuestTagRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GuestTagRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &TagInput,
    ) -> Result<GuestTagModel, RepositoryError> {
        GuestTagActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name.trim().to_string()),
            color: Set(clean_optional(input.color.as_deref())),
            created_at: Set(timestamp_now()),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GuestTagModel>, RepositoryError> {
        GuestTag::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<GuestTagModel>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        GuestTag::find()
            .filter(GuestTagColumn::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<GuestTagModel>, RepositoryError> {
        GuestTag::find()
            .filter(GuestTagColumn::UserId.eq(user_id))
            .order_by_asc(GuestTagColumn::Name)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Delete a tag together with its assignments
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        GuestTagAssignment::delete_many()
            .filter(AssignmentColumn::TagId.eq(id))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        GuestTag::delete_by_id(id)
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }

    pub async fn assignments_for_guests(
        &self,
        guest_ids: &[Uuid],
    ) -> Result<Vec<AssignmentModel>, RepositoryError> {
        if guest_ids.is_empty() {
            return Ok(Vec::new());
        }
        GuestTagAssignment::find()
            .filter(AssignmentColumn::GuestId.is_in(guest_ids.iter().copied()))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Make `tag_ids` the exact set of tags assigned to a guest
    pub async fn replace_assignments(
        &self,
        guest_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<(), RepositoryError> {
        self.delete_assignments_for_guests(&[guest_id]).await?;

        let now = timestamp_now();
        let mut seen = std::collections::HashSet::new();
        let rows: Vec<AssignmentActiveModel> = tag_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .map(|tag_id| AssignmentActiveModel {
                guest_id: Set(guest_id),
                tag_id: Set(*tag_id),
                created_at: Set(now),
            })
            .collect();
        if rows.is_empty() {
            return Ok(());
        }

        GuestTagAssignment::insert_many(rows)
            .exec_without_returning(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }

    pub async fn delete_assignments_for_guests(
        &self,
        guest_ids: &[Uuid],
    ) -> Result<u64, RepositoryError> {
        if guest_ids.is_empty() {
            return Ok(0);
        }
        let result = GuestTagAssignment::delete_many()
            .filter(AssignmentColumn::GuestId.is_in(guest_ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }
}
