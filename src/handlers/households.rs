//! # Household, Guest, Invitation and Tag Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::application::HouseholdManagementService;
use crate::auth::{UserExtension, UserHeader};
use crate::error::ApiError;
use crate::handlers::types::{ListResponse, ValidatedJson};
use crate::models::inputs::{HouseholdInput, TagInput, UpdateInvitationInput};
use crate::models::views::{GuestView, HouseholdView, InvitationView, TagView};
use crate::server::AppState;
use crate::services::{GuestService, GuestTagService, HouseholdService, InvitationService};

#[utoipa::path(
    get,
    path = "/api/v1/households",
    security(("bearer_auth" = [])),
    params(UserHeader),
    responses(
        (status = 200, description = "Households with guests and gifts", body = ListResponse<HouseholdView>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "households"
)]
pub async fn list_households(
    State(state): State<AppState>,
    user: UserExtension,
) -> Result<Json<ListResponse<HouseholdView>>, ApiError> {
    let households = HouseholdService::new(&state.db).list(user.id()).await?;
    Ok(Json(households.into()))
}

/// Create a household with its guest party, invitations, tags and gifts
#[utoipa::path(
    post,
    path = "/api/v1/households",
    security(("bearer_auth" = [])),
    params(UserHeader),
    request_body = HouseholdInput,
    responses(
        (status = 201, description = "Household created", body = HouseholdView),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 403, description = "Referenced event or tag belongs to another user", body = ApiError),
        (status = 404, description = "Referenced event or tag not found", body = ApiError)
    ),
    tag = "households"
)]
pub async fn create_household(
    State(state): State<AppState>,
    user: UserExtension,
    ValidatedJson(input): ValidatedJson<HouseholdInput>,
) -> Result<(StatusCode, Json<HouseholdView>), ApiError> {
    let household = HouseholdManagementService::new(&state.db)
        .create(user.id(), &input)
        .await?;
    Ok((StatusCode::CREATED, Json(household)))
}

/// Replace a household's contact details and party
#[utoipa::path(
    put,
    path = "/api/v1/households/{id}",
    security(("bearer_auth" = [])),
    params(UserHeader, ("id" = Uuid, Path, description = "Household UUID")),
    request_body = HouseholdInput,
    responses(
        (status = 200, description = "Household updated", body = HouseholdView),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 403, description = "Household belongs to another user", body = ApiError),
        (status = 404, description = "Household not found", body = ApiError)
    ),
    tag = "households"
)]
pub async fn update_household(
    State(state): State<AppState>,
    user: UserExtension,
    Path(household_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<HouseholdInput>,
) -> Result<Json<HouseholdView>, ApiError> {
    let household = HouseholdManagementService::new(&state.db)
        .update(user.id(), household_id, &input)
        .await?;
    Ok(Json(household))
}

#[utoipa::path(
    delete,
    path = "/api/v1/households/{id}",
    security(("bearer_auth" = [])),
    params(UserHeader, ("id" = Uuid, Path, description = "Household UUID")),
    responses(
        (status = 204, description = "Household deleted"),
        (status = 403, description = "Household belongs to another user", body = ApiError),
        (status = 404, description = "Household not found", body = ApiError)
    ),
    tag = "households"
)]
pub async fn delete_household(
    State(state): State<AppState>,
    user: UserExtension,
    Path(household_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    HouseholdManagementService::new(&state.db)
        .delete(user.id(), household_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/guests",
    security(("bearer_auth" = [])),
    params(UserHeader),
    responses(
        (status = 200, description = "Guests with invitations and tag ids", body = ListResponse<GuestView>)
    ),
    tag = "guests"
)]
pub async fn list_guests(
    State(state): State<AppState>,
    user: UserExtension,
) -> Result<Json<ListResponse<GuestView>>, ApiError> {
    let guests = GuestService::new(&state.db).list(user.id()).await?;
    Ok(Json(guests.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/invitations",
    security(("bearer_auth" = [])),
    params(UserHeader),
    responses(
        (status = 200, description = "All invitations of the wedding", body = ListResponse<InvitationView>)
    ),
    tag = "invitations"
)]
pub async fn list_invitations(
    State(state): State<AppState>,
    user: UserExtension,
) -> Result<Json<ListResponse<InvitationView>>, ApiError> {
    let invitations = InvitationService::new(&state.db).list(user.id()).await?;
    Ok(Json(invitations.into()))
}

/// Set an invitation's status from the couple's side
#[utoipa::path(
    patch,
    path = "/api/v1/invitations/{guest_id}/{event_id}",
    security(("bearer_auth" = [])),
    params(
        UserHeader,
        ("guest_id" = Uuid, Path, description = "Guest UUID"),
        ("event_id" = Uuid, Path, description = "Event UUID")
    ),
    request_body = UpdateInvitationInput,
    responses(
        (status = 200, description = "Invitation updated", body = InvitationView),
        (status = 403, description = "Invitation belongs to another user", body = ApiError),
        (status = 404, description = "Invitation not found", body = ApiError)
    ),
    tag = "invitations"
)]
pub async fn update_invitation(
    State(state): State<AppState>,
    user: UserExtension,
    Path((guest_id, event_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateInvitationInput>,
) -> Result<Json<InvitationView>, ApiError> {
    let invitation = InvitationService::new(&state.db)
        .update(user.id(), guest_id, event_id, input.rsvp)
        .await?;
    Ok(Json(invitation))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    security(("bearer_auth" = [])),
    params(UserHeader),
    responses(
        (status = 200, description = "Guest tags", body = ListResponse<TagView>)
    ),
    tag = "tags"
)]
pub async fn list_tags(
    State(state): State<AppState>,
    user: UserExtension,
) -> Result<Json<ListResponse<TagView>>, ApiError> {
    let tags = GuestTagService::new(&state.db).list(user.id()).await?;
    Ok(Json(tags.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/tags",
    security(("bearer_auth" = [])),
    params(UserHeader),
    request_body = TagInput,
    responses(
        (status = 201, description = "Tag created", body = TagView),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "A tag with this name exists", body = ApiError)
    ),
    tag = "tags"
)]
pub async fn create_tag(
    State(state): State<AppState>,
    user: UserExtension,
    ValidatedJson(input): ValidatedJson<TagInput>,
) -> Result<(StatusCode, Json<TagView>), ApiError> {
    let tag = GuestTagService::new(&state.db)
        .create(user.id(), &input)
        .await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    security(("bearer_auth" = [])),
    params(UserHeader, ("id" = Uuid, Path, description = "Tag UUID")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 403, description = "Tag belongs to another user", body = ApiError),
        (status = 404, description = "Tag not found", body = ApiError)
    ),
    tag = "tags"
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    user: UserExtension,
    Path(tag_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let txn = state.db.begin().await?;
    GuestTagService::new(&txn).delete(user.id(), tag_id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
