//! Website entity model
//!
//! This module contains the SeaORM entity model for the websites table, the
//! per-wedding public microsite configuration.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Website entity representing a wedding's public microsite
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "websites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user (one website per user)
    pub user_id: Uuid,

    /// Path segment the public site is served under (unique)
    pub sub_url: String,

    /// Fully qualified public URL derived from the configured base URL
    pub url: String,

    /// Optional shared password guests must supply
    pub password: Option<String>,

    pub is_password_enabled: bool,

    /// Whether guests may look up and submit RSVPs
    pub is_rsvp_enabled: bool,

    pub cover_photo_url: Option<String>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::question::Entity")]
    Questions,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
