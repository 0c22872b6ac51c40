//! # Public Website Handlers
//!
//! Unauthenticated routes used by wedding guests. Password-protected
//! websites expect the visitor password in `X-Website-Password`.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::application::{RsvpLookup, RsvpSubmissionService, RsvpWizardService, SubmissionReceipt};
use crate::auth::{WebsitePassword, WebsitePasswordHeader};
use crate::error::{ApiError, internal_error};
use crate::handlers::types::ValidatedJson;
use crate::models::inputs::{RsvpLookupInput, RsvpSubmissionInput};
use crate::models::views::PublicWebsiteView;
use crate::server::AppState;
use crate::services::website::find_public;
use crate::services::{EventService, UserService};

#[utoipa::path(
    get,
    path = "/public/websites/{sub_url}",
    params(
        WebsitePasswordHeader,
        ("sub_url" = String, Path, description = "Website address, e.g. jane-and-john")
    ),
    responses(
        (status = 200, description = "Public website", body = PublicWebsiteView),
        (status = 401, description = "Website password required", body = ApiError),
        (status = 404, description = "Website not found", body = ApiError)
    ),
    tag = "public"
)]
pub async fn get_public_website(
    State(state): State<AppState>,
    Path(sub_url): Path<String>,
    WebsitePassword(password): WebsitePassword,
) -> Result<Json<PublicWebsiteView>, ApiError> {
    let website = find_public(&state.db, &sub_url, password.as_deref()).await?;
    let user = UserService::new(&state.db)
        .find(website.user_id)
        .await?
        .ok_or_else(|| internal_error("Website has no owning user"))?;
    let events = EventService::new(&state.db).list(website.user_id).await?;

    Ok(Json(PublicWebsiteView::new(website, &user, events)))
}

/// Find a guest's party by name and return its RSVP wizard plan
#[utoipa::path(
    post,
    path = "/public/websites/{sub_url}/rsvp/lookup",
    params(
        WebsitePasswordHeader,
        ("sub_url" = String, Path, description = "Website address")
    ),
    request_body = RsvpLookupInput,
    responses(
        (status = 200, description = "Matching parties with their wizard steps", body = RsvpLookup),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Website password required", body = ApiError),
        (status = 403, description = "RSVP is closed", body = ApiError),
        (status = 404, description = "Website or guest not found", body = ApiError)
    ),
    tag = "public"
)]
pub async fn lookup_rsvp(
    State(state): State<AppState>,
    Path(sub_url): Path<String>,
    WebsitePassword(password): WebsitePassword,
    ValidatedJson(input): ValidatedJson<RsvpLookupInput>,
) -> Result<Json<RsvpLookup>, ApiError> {
    let lookup = RsvpWizardService::new(&state.db)
        .lookup(&sub_url, password.as_deref(), &input)
        .await?;
    Ok(Json(lookup))
}

/// Submit RSVP replies and answers in one transaction
#[utoipa::path(
    post,
    path = "/public/websites/{sub_url}/rsvp",
    params(
        WebsitePasswordHeader,
        ("sub_url" = String, Path, description = "Website address")
    ),
    request_body = RsvpSubmissionInput,
    responses(
        (status = 200, description = "Submission recorded", body = SubmissionReceipt),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Website password required", body = ApiError),
        (status = 403, description = "RSVP closed or record belongs to another wedding", body = ApiError),
        (status = 404, description = "Invitation, question or option not found", body = ApiError)
    ),
    tag = "public"
)]
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Path(sub_url): Path<String>,
    WebsitePassword(password): WebsitePassword,
    ValidatedJson(input): ValidatedJson<RsvpSubmissionInput>,
) -> Result<Json<SubmissionReceipt>, ApiError> {
    let receipt = RsvpSubmissionService::new(&state.db)
        .submit(&sub_url, password.as_deref(), &input)
        .await?;
    Ok(Json(receipt))
}
