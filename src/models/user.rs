//! User entity model
//!
//! This module contains the SeaORM entity model for the users table. A user is
//! the couple's account and the tenant every other record is scoped to.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// User entity representing the couple that owns a wedding
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user (primary key, issued by the auth provider)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Contact email (optional)
    pub email: Option<String>,

    pub groom_first_name: String,
    pub groom_last_name: String,
    pub bride_first_name: String,
    pub bride_last_name: String,

    /// Timestamp when the user was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the user was last updated
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Display name used on the public website, e.g. "Jane & John"
    pub fn couple_display_name(&self) -> String {
        format!("{} & {}", self.bride_first_name, self.groom_first_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
