//! # Data Models
//!
//! This module contains the SeaORM entities and shared value types used
//! throughout the wedding planner API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub mod answer;
pub mod event;
pub mod gift;
pub mod guest;
pub mod guest_tag;
pub mod guest_tag_assignment;
pub mod household;
pub mod inputs;
pub mod invitation;
pub mod option_response;
pub mod question;
pub mod question_option;
pub mod user;
pub mod views;
pub mod website;

pub use answer::Entity as Answer;
pub use event::Entity as Event;
pub use gift::Entity as Gift;
pub use guest::Entity as Guest;
pub use guest_tag::Entity as GuestTag;
pub use guest_tag_assignment::Entity as GuestTagAssignment;
pub use household::Entity as Household;
pub use invitation::Entity as Invitation;
pub use option_response::Entity as OptionResponse;
pub use question::Entity as Question;
pub use question_option::Entity as QuestionOption;
pub use user::Entity as User;
pub use website::Entity as Website;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "wedding-planner".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Raised when a stored or submitted enum string is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// RSVP status of an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RsvpStatus {
    #[serde(rename = "Not Invited")]
    NotInvited,
    Invited,
    Attending,
    Declined,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::NotInvited => "Not Invited",
            RsvpStatus::Invited => "Invited",
            RsvpStatus::Attending => "Attending",
            RsvpStatus::Declined => "Declined",
        }
    }

    /// Whether a guest can reply with this status from the public RSVP form
    pub fn is_guest_reply(&self) -> bool {
        matches!(self, RsvpStatus::Attending | RsvpStatus::Declined)
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not Invited" => Ok(RsvpStatus::NotInvited),
            "Invited" => Ok(RsvpStatus::Invited),
            "Attending" => Ok(RsvpStatus::Attending),
            "Declined" => Ok(RsvpStatus::Declined),
            other => Err(UnknownVariant {
                kind: "rsvp status",
                value: other.to_string(),
            }),
        }
    }
}

/// Kind of answer a question collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum QuestionType {
    Text,
    Option,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "Text",
            QuestionType::Option => "Option",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Text" => Ok(QuestionType::Text),
            "Option" => Ok(QuestionType::Option),
            other => Err(UnknownVariant {
                kind: "question type",
                value: other.to_string(),
            }),
        }
    }
}
