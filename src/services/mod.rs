//! # Domain Services
//!
//! Per-entity business rules on top of the repositories: ownership checks,
//! validation that needs the database, and shaping models into views.
//! Like the repositories, every service borrows a connection that may be a
//! transaction.

pub mod event;
pub mod guest;
pub mod guest_tag;
pub mod household;
pub mod invitation;
pub mod question;
pub mod user;
pub mod website;

pub use event::EventService;
pub use guest::GuestService;
pub use guest_tag::GuestTagService;
pub use household::HouseholdService;
pub use invitation::InvitationService;
pub use question::QuestionService;
pub use user::UserService;
pub use website::WebsiteService;

use uuid::Uuid;

use crate::error::{ApiError, forbidden, not_found};

/// Resolve a fetched record into an owned one.
///
/// Missing records are NOT_FOUND, records of another user are FORBIDDEN.
pub(crate) fn ensure_owned<M>(
    record: Option<M>,
    owner: impl Fn(&M) -> Uuid,
    user_id: Uuid,
    resource: &str,
    id: impl std::fmt::Display,
) -> Result<M, ApiError> {
    let record = record.ok_or_else(|| not_found(resource, id))?;
    if owner(&record) != user_id {
        tracing::warn!(%user_id, resource, "Rejected access to another user's record");
        return Err(forbidden(Some(&format!(
            "{resource} does not belong to this wedding"
        ))));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn ensure_owned_distinguishes_missing_and_foreign() {
        let me = Uuid::new_v4();
        let someone_else = Uuid::new_v4();

        let missing = ensure_owned(None::<Uuid>, |owner| *owner, me, "Event", "x").unwrap_err();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let foreign =
            ensure_owned(Some(someone_else), |owner| *owner, me, "Event", "x").unwrap_err();
        assert_eq!(foreign.status, StatusCode::FORBIDDEN);

        assert_eq!(ensure_owned(Some(me), |owner| *owner, me, "Event", "x").unwrap(), me);
    }
}
