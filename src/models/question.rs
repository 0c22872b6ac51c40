//! Question entity model
//!
//! This module contains the SeaORM entity model for the questions table. A
//! question is attached to exactly one of an event or a website.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::QuestionType;

/// Question entity representing an RSVP form prompt
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Parent event (mutually exclusive with `website_id`)
    pub event_id: Option<Uuid>,

    /// Parent website (mutually exclusive with `event_id`)
    pub website_id: Option<Uuid>,

    pub prompt: String,

    /// Question type (Text|Option)
    pub question_type: String,

    pub is_required: bool,

    /// Answered once per guest when true, once per household otherwise
    pub per_guest: bool,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Parsed question type; unknown strings fall back to free text
    pub fn kind(&self) -> QuestionType {
        self.question_type.parse().unwrap_or(QuestionType::Text)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::website::Entity",
        from = "Column::WebsiteId",
        to = "super::website::Column::Id",
        on_delete = "Cascade"
    )]
    Website,
    #[sea_orm(has_many = "super::question_option::Entity")]
    Options,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::website::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Website.def()
    }
}

impl Related<super::question_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Options.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
