//! # User and Website Handlers
//!
//! Couple onboarding, profile updates and website settings.

use axum::{extract::State, http::StatusCode, response::Json};
use sea_orm::TransactionTrait;

use crate::auth::{UserExtension, UserHeader};
use crate::error::ApiError;
use crate::handlers::types::ValidatedJson;
use crate::models::inputs::{OnboardUserInput, UpdateUserInput, UpdateWebsiteInput};
use crate::models::views::{UserView, WebsiteView};
use crate::server::AppState;
use crate::services::user::OnboardedUser;
use crate::services::{UserService, WebsiteService};

/// Create the couple's account and their wedding website
#[utoipa::path(
    post,
    path = "/api/v1/user",
    security(("bearer_auth" = [])),
    params(UserHeader),
    request_body = OnboardUserInput,
    responses(
        (status = 201, description = "User onboarded", body = OnboardedUser),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 409, description = "User already onboarded or website address taken", body = ApiError)
    ),
    tag = "user"
)]
pub async fn onboard_user(
    State(state): State<AppState>,
    user: UserExtension,
    ValidatedJson(input): ValidatedJson<OnboardUserInput>,
) -> Result<(StatusCode, Json<OnboardedUser>), ApiError> {
    let txn = state.db.begin().await?;
    let onboarded = UserService::new(&txn)
        .onboard(user.id(), &input, &state.config.website_base_url)
        .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(onboarded)))
}

#[utoipa::path(
    get,
    path = "/api/v1/user",
    security(("bearer_auth" = [])),
    params(UserHeader),
    responses(
        (status = 200, description = "Current user", body = UserView),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "User has not onboarded", body = ApiError)
    ),
    tag = "user"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: UserExtension,
) -> Result<Json<UserView>, ApiError> {
    let model = UserService::new(&state.db).get(user.id()).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/user",
    security(("bearer_auth" = [])),
    params(UserHeader),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "User updated", body = UserView),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "User has not onboarded", body = ApiError)
    ),
    tag = "user"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: UserExtension,
    ValidatedJson(input): ValidatedJson<UpdateUserInput>,
) -> Result<Json<UserView>, ApiError> {
    let view = UserService::new(&state.db).update(user.id(), &input).await?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/api/v1/website",
    security(("bearer_auth" = [])),
    params(UserHeader),
    responses(
        (status = 200, description = "Website settings", body = WebsiteView),
        (status = 404, description = "Website not found", body = ApiError)
    ),
    tag = "website"
)]
pub async fn get_website(
    State(state): State<AppState>,
    user: UserExtension,
) -> Result<Json<WebsiteView>, ApiError> {
    let website = WebsiteService::new(&state.db, &state.config.website_base_url)
        .get_for_user(user.id())
        .await?;
    Ok(Json(website.into()))
}

/// Update website settings; changing `sub_url` regenerates the public URL
#[utoipa::path(
    patch,
    path = "/api/v1/website",
    security(("bearer_auth" = [])),
    params(UserHeader),
    request_body = UpdateWebsiteInput,
    responses(
        (status = 200, description = "Website updated", body = WebsiteView),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Website not found", body = ApiError),
        (status = 409, description = "Website address taken", body = ApiError)
    ),
    tag = "website"
)]
pub async fn update_website(
    State(state): State<AppState>,
    user: UserExtension,
    ValidatedJson(input): ValidatedJson<UpdateWebsiteInput>,
) -> Result<Json<WebsiteView>, ApiError> {
    let view = WebsiteService::new(&state.db, &state.config.website_base_url)
        .update(user.id(), &input)
        .await?;
    Ok(Json(view))
}
