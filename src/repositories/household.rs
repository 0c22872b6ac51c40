//! # Household Repository

use crate::error::RepositoryError;
use crate::models::household::{
    ActiveModel as HouseholdActiveModel, Column as HouseholdColumn, Entity as Household,
    Model as HouseholdModel,
};
use crate::models::inputs::HouseholdInput;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::{clean_optional, timestamp_now};

/// Repository for Household database operations
pub struct HouseholdRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HouseholdRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a household from the contact fields of `input` (guests are handled separately)
    pub async fn create(
        &self,
        user_id: Uuid,
        input: &HouseholdInput,
    ) -> Result<HouseholdModel, RepositoryError> {
        let now = timestamp_now();
        let mut household = HouseholdActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_contact(&mut household, input);

        household
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<HouseholdModel>, RepositoryError> {
        Household::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<HouseholdModel>, RepositoryError> {
        Household::find()
            .filter(HouseholdColumn::UserId.eq(user_id))
            .order_by_asc(HouseholdColumn::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn update_contact(
        &self,
        household: HouseholdModel,
        input: &HouseholdInput,
    ) -> Result<HouseholdModel, RepositoryError> {
        let mut active = household.into_active_model();
        apply_contact(&mut active, input);
        active.updated_at = Set(timestamp_now());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        Household::delete_by_id(id)
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }
}

fn apply_contact(active: &mut HouseholdActiveModel, input: &HouseholdInput) {
    active.address1 = Set(clean_optional(input.address1.as_deref()));
    active.address2 = Set(clean_optional(input.address2.as_deref()));
    active.city = Set(clean_optional(input.city.as_deref()));
    active.state = Set(clean_optional(input.state.as_deref()));
    active.country = Set(clean_optional(input.country.as_deref()));
    active.zip_code = Set(clean_optional(input.zip_code.as_deref()));
    active.phone = Set(clean_optional(input.phone.as_deref()));
    active.email = Set(clean_optional(input.email.as_deref()));
    active.notes = Set(clean_optional(input.notes.as_deref()));
}
