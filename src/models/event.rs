//! Event entity model
//!
//! This module contains the SeaORM entity model for the events table. An event
//! is one wedding function (ceremony, reception, brunch...).

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Event entity representing a single wedding function
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    pub name: String,

    /// Calendar date of the event (optional until the couple decides)
    pub date: Option<Date>,

    /// Free-form start time as entered by the couple (e.g. "5:00 PM")
    pub start_time: Option<String>,

    /// Free-form end time as entered by the couple
    pub end_time: Option<String>,

    pub venue: Option<String>,
    pub attire: Option<String>,
    pub description: Option<String>,

    /// Whether guests are asked to RSVP for this event
    pub collect_rsvp: bool,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::question::Entity")]
    Questions,
    #[sea_orm(has_many = "super::invitation::Entity")]
    Invitations,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::invitation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invitations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
