//! # User Service
//!
//! Couple accounts. Onboarding creates the user and its website together, so
//! callers should run it inside a transaction.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::{ApiError, conflict, not_found};
use crate::models::inputs::{OnboardUserInput, UpdateUserInput};
use crate::models::user;
use crate::models::views::{UserView, WebsiteView};
use crate::repositories::UserRepository;
use crate::services::WebsiteService;

/// Result of onboarding a new couple
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct OnboardedUser {
    pub user: UserView,
    pub website: WebsiteView,
}

pub struct UserService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn onboard(
        &self,
        user_id: Uuid,
        input: &OnboardUserInput,
        website_base_url: &str,
    ) -> Result<OnboardedUser, ApiError> {
        let repo = UserRepository::new(self.db);
        if repo.find_by_id(user_id).await?.is_some() {
            return Err(conflict("User is already onboarded"));
        }

        let user = repo.create(user_id, input).await?;
        let website = WebsiteService::new(self.db, website_base_url)
            .create_for_user(&user, input.sub_url.as_deref())
            .await?;

        tracing::info!(%user_id, sub_url = %website.sub_url, "Onboarded user");
        Ok(OnboardedUser {
            user: user.into(),
            website: website.into(),
        })
    }

    pub async fn find(&self, user_id: Uuid) -> Result<Option<user::Model>, ApiError> {
        Ok(UserRepository::new(self.db).find_by_id(user_id).await?)
    }

    pub async fn get(&self, user_id: Uuid) -> Result<user::Model, ApiError> {
        self.find(user_id)
            .await?
            .ok_or_else(|| not_found("User", user_id))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        input: &UpdateUserInput,
    ) -> Result<UserView, ApiError> {
        let mut user = self.get(user_id).await?;

        if let Some(email) = input.email.as_deref() {
            user.email = Some(email.trim().to_string()).filter(|e| !e.is_empty());
        }
        if let Some(name) = input.groom_first_name.as_deref() {
            user.groom_first_name = name.trim().to_string();
        }
        if let Some(name) = input.groom_last_name.as_deref() {
            user.groom_last_name = name.trim().to_string();
        }
        if let Some(name) = input.bride_first_name.as_deref() {
            user.bride_first_name = name.trim().to_string();
        }
        if let Some(name) = input.bride_last_name.as_deref() {
            user.bride_last_name = name.trim().to_string();
        }

        let user = UserRepository::new(self.db).update(user).await?;
        Ok(user.into())
    }
}
