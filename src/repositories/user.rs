//! # User Repository
//!
//! Persistence for couple accounts, the root of every tenant-scoped record.

use crate::error::RepositoryError;
use crate::models::inputs::OnboardUserInput;
use crate::models::user::{ActiveModel as UserActiveModel, Entity as User, Model as UserModel};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use super::{clean_optional, timestamp_now};

/// Repository for User database operations
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a user with the given id (ids are issued by the identity provider)
    pub async fn create(
        &self,
        id: Uuid,
        input: &OnboardUserInput,
    ) -> Result<UserModel, RepositoryError> {
        let now = timestamp_now();
        let user = UserActiveModel {
            id: Set(id),
            email: Set(clean_optional(input.email.as_deref())),
            groom_first_name: Set(input.groom_first_name.trim().to_string()),
            groom_last_name: Set(input.groom_last_name.trim().to_string()),
            bride_first_name: Set(input.bride_first_name.trim().to_string()),
            bride_last_name: Set(input.bride_last_name.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserModel>, RepositoryError> {
        User::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Persist every column of an edited model
    pub async fn update(&self, user: UserModel) -> Result<UserModel, RepositoryError> {
        let mut active = user.into_active_model().reset_all();
        active.updated_at = Set(timestamp_now());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
