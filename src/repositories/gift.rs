//! # Gift Repository

use crate::error::RepositoryError;
use crate::models::gift::{
    ActiveModel as GiftActiveModel, Column as GiftColumn, Entity as Gift, Model as GiftModel,
};
use crate::models::inputs::GiftInput;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
};
use uuid::Uuid;

use super::{clean_optional, timestamp_now};

/// Repository for Gift database operations
pub struct GiftRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GiftRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert or overwrite the gift record for `(household_id, event_id)`
    pub async fn upsert(
        &self,
        household_id: Uuid,
        input: &GiftInput,
    ) -> Result<GiftModel, RepositoryError> {
        let now = timestamp_now();
        let existing = Gift::find_by_id((household_id, input.event_id))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        match existing {
            Some(gift) => {
                let mut active = gift.into_active_model();
                active.description = Set(clean_optional(input.description.as_deref()));
                active.thank_you = Set(input.thank_you);
                active.updated_at = Set(now);
                active
                    .update(self.db)
                    .await
                    .map_err(RepositoryError::database_error)
            }
            None => GiftActiveModel {
                household_id: Set(household_id),
                event_id: Set(input.event_id),
                description: Set(clean_optional(input.description.as_deref())),
                thank_you: Set(input.thank_you),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error),
        }
    }

    pub async fn list_by_households(
        &self,
        household_ids: &[Uuid],
    ) -> Result<Vec<GiftModel>, RepositoryError> {
        if household_ids.is_empty() {
            return Ok(Vec::new());
        }
        Gift::find()
            .filter(GiftColumn::HouseholdId.is_in(household_ids.iter().copied()))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete_by_household(&self, household_id: Uuid) -> Result<u64, RepositoryError> {
        let result = Gift::delete_many()
            .filter(GiftColumn::HouseholdId.eq(household_id))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_event(&self, event_id: Uuid) -> Result<u64, RepositoryError> {
        let result = Gift::delete_many()
            .filter(GiftColumn::EventId.eq(event_id))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }
}
