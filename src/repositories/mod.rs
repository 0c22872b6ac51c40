//! # Repository Layer
//!
//! Thin wrappers over SeaORM queries, one per aggregate. Every repository is
//! generic over [`sea_orm::ConnectionTrait`] so the same code runs against the
//! shared pool or inside a [`sea_orm::DatabaseTransaction`].

pub mod answer;
pub mod event;
pub mod gift;
pub mod guest;
pub mod guest_tag;
pub mod household;
pub mod invitation;
pub mod question;
pub mod user;
pub mod website;

pub use answer::AnswerRepository;
pub use event::EventRepository;
pub use gift::GiftRepository;
pub use guest::GuestRepository;
pub use guest_tag::GuestTagRepository;
pub use household::HouseholdRepository;
pub use invitation::InvitationRepository;
pub use question::QuestionRepository;
pub use user::UserRepository;
pub use website::WebsiteRepository;

use sea_orm::prelude::DateTimeWithTimeZone;

/// Current time in the column type used by every timestamp
pub(crate) fn timestamp_now() -> DateTimeWithTimeZone {
    chrono::Utc::now().into()
}

/// Empty trimmed strings are stored as NULL
pub(crate) fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
