//! # Guest Tag Service

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::{ApiError, forbidden};
use crate::models::inputs::TagInput;
use crate::models::views::TagView;
use crate::repositories::GuestTagRepository;
use crate::services::ensure_owned;

pub struct GuestTagService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GuestTagService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<TagView>, ApiError> {
        let tags = GuestTagRepository::new(self.db).list_by_user(user_id).await?;
        Ok(tags.into_iter().map(TagView::from).collect())
    }

    /// Create a tag; a duplicate name for the same user is a CONFLICT
    pub async fn create(&self, user_id: Uuid, input: &TagInput) -> Result<TagView, ApiError> {
        let tag = GuestTagRepository::new(self.db).create(user_id, input).await?;
        Ok(tag.into())
    }

    pub async fn delete(&self, user_id: Uuid, tag_id: Uuid) -> Result<(), ApiError> {
        let repo = GuestTagRepository::new(self.db);
        ensure_owned(
            repo.find_by_id(tag_id).await?,
            |t| t.user_id,
            user_id,
            "Tag",
            tag_id,
        )?;
        repo.delete(tag_id).await?;
        Ok(())
    }

    /// Fail unless every tag id belongs to `user_id`
    pub async fn ensure_all_owned(&self, user_id: Uuid, tag_ids: &[Uuid]) -> Result<(), ApiError> {
        let mut unique: Vec<Uuid> = tag_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let tags = GuestTagRepository::new(self.db).find_by_ids(&unique).await?;
        if tags.len() != unique.len() {
            let missing = unique
                .iter()
                .find(|id| !tags.iter().any(|t| t.id == **id))
                .copied()
                .unwrap_or_default();
            return Err(crate::error::not_found("Tag", missing));
        }
        if tags.iter().any(|t| t.user_id != user_id) {
            return Err(forbidden(Some("Tag does not belong to this wedding")));
        }
        Ok(())
    }

    /// Replace the tag set of one guest
    pub async fn assign(
        &self,
        user_id: Uuid,
        guest_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<(), ApiError> {
        self.ensure_all_owned(user_id, tag_ids).await?;
        GuestTagRepository::new(self.db)
            .replace_assignments(guest_id, tag_ids)
            .await?;
        Ok(())
    }
}
