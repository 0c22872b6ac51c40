//! Invitation entity model
//!
//! This module contains the SeaORM entity model for the invitations table, the
//! per (guest, event) RSVP record.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::RsvpStatus;

/// Invitation entity joining a guest to an event with an RSVP status
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "invitations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guest_id: Uuid,

    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// RSVP status (Not Invited|Invited|Attending|Declined)
    pub rsvp: String,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Parsed RSVP status; unknown strings are treated as not invited
    pub fn status(&self) -> RsvpStatus {
        self.rsvp.parse().unwrap_or(RsvpStatus::NotInvited)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::GuestId",
        to = "super::guest::Column::Id",
        on_delete = "Cascade"
    )]
    Guest,
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
