//! # Guest Repository

use crate::error::RepositoryError;
use crate::models::guest::{
    ActiveModel as GuestActiveModel, Column as GuestColumn, Entity as Guest, Model as GuestModel,
};
use crate::models::inputs::GuestInput;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::timestamp_now;

/// Repository for Guest database operations
pub struct GuestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GuestRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        household_id: Uuid,
        input: &GuestInput,
        is_primary_contact: bool,
    ) -> Result<GuestModel, RepositoryError> {
        let now = timestamp_now();
        let guest = GuestActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            household_id: Set(household_id),
            first_name: Set(input.first_name.trim().to_string()),
            last_name: Set(input.last_name.trim().to_string()),
            is_primary_contact: Set(is_primary_contact),
            created_at: Set(now),
            updated_at: Set(now),
        };

        guest
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GuestModel>, RepositoryError> {
        Guest::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<GuestModel>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Guest::find()
            .filter(GuestColumn::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Guests of a user sorted by last then first name
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<GuestModel>, RepositoryError> {
        Guest::find()
            .filter(GuestColumn::UserId.eq(user_id))
            .order_by_asc(GuestColumn::LastName)
            .order_by_asc(GuestColumn::FirstName)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_by_household(
        &self,
        household_id: Uuid,
    ) -> Result<Vec<GuestModel>, RepositoryError> {
        Guest::find()
            .filter(GuestColumn::HouseholdId.eq(household_id))
            .order_by_desc(GuestColumn::IsPrimaryContact)
            .order_by_asc(GuestColumn::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Case-insensitive exact name match within one user's guest list.
    ///
    /// SQLite's `lower()` only folds ASCII, so names are compared after
    /// loading with the same Unicode lowercasing on both sides.
    pub async fn find_by_name(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<GuestModel>, RepositoryError> {
        let guests = Guest::find()
            .filter(GuestColumn::UserId.eq(user_id))
            .order_by_asc(GuestColumn::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(guests
            .into_iter()
            .filter(|g| {
                same_name(&g.first_name, first_name) && same_name(&g.last_name, last_name)
            })
            .collect())
    }

    /// Persist name and primary-contact changes
    pub async fn update(
        &self,
        guest: GuestModel,
        input: &GuestInput,
        is_primary_contact: bool,
    ) -> Result<GuestModel, RepositoryError> {
        let mut active = guest.into_active_model();
        active.first_name = Set(input.first_name.trim().to_string());
        active.last_name = Set(input.last_name.trim().to_string());
        active.is_primary_contact = Set(is_primary_contact);
        active.updated_at = Set(timestamp_now());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Unset the primary contact flag for every guest in a household
    pub async fn clear_primary_contacts(&self, household_id: Uuid) -> Result<u64, RepositoryError> {
        let result = Guest::update_many()
            .col_expr(GuestColumn::IsPrimaryContact, Expr::value(false))
            .col_expr(GuestColumn::UpdatedAt, Expr::value(timestamp_now()))
            .filter(GuestColumn::HouseholdId.eq(household_id))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = Guest::delete_many()
            .filter(GuestColumn::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(result.rows_affected)
    }
}

fn same_name(stored: &str, entered: &str) -> bool {
    stored.trim().to_lowercase() == entered.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::same_name;

    #[test]
    fn names_compare_without_case_or_padding() {
        assert!(same_name("Élise", " éLISE "));
        assert!(same_name("Ann", "ANN"));
        assert!(!same_name("Ann", "Anne"));
    }
}
