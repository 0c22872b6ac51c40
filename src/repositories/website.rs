//! # Website Repository

use crate::error::RepositoryError;
use crate::models::website::{
    ActiveModel as WebsiteActiveModel, Column as WebsiteColumn, Entity as Website,
    Model as WebsiteModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use super::timestamp_now;

/// Repository for Website database operations
pub struct WebsiteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WebsiteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create the website for a user with RSVP enabled and no password
    pub async fn create(
        &self,
        user_id: Uuid,
        sub_url: &str,
        url: &str,
    ) -> Result<WebsiteModel, RepositoryError> {
        let now = timestamp_now();
        let website = WebsiteActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            sub_url: Set(sub_url.to_string()),
            url: Set(url.to_string()),
            password: Set(None),
            is_password_enabled: Set(false),
            is_rsvp_enabled: Set(true),
            cover_photo_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        website
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<WebsiteModel>, RepositoryError> {
        Website::find()
            .filter(WebsiteColumn::UserId.eq(user_id))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_sub_url(
        &self,
        sub_url: &str,
    ) -> Result<Option<WebsiteModel>, RepositoryError> {
        Website::find()
            .filter(WebsiteColumn::SubUrl.eq(sub_url))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WebsiteModel>, RepositoryError> {
        Website::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Whether another website already uses `sub_url`
    pub async fn sub_url_taken(
        &self,
        sub_url: &str,
        except_website: Option<Uuid>,
    ) -> Result<bool, RepositoryError> {
        let mut query = Website::find().filter(WebsiteColumn::SubUrl.eq(sub_url));
        if let Some(id) = except_website {
            query = query.filter(WebsiteColumn::Id.ne(id));
        }

        let count = query
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(count > 0)
    }

    pub async fn update(&self, website: WebsiteModel) -> Result<WebsiteModel, RepositoryError> {
        let mut active = website.into_active_model().reset_all();
        active.updated_at = Set(timestamp_now());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
