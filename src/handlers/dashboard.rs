//! # Dashboard Handler

use axum::{extract::State, response::Json};

use crate::application::{DashboardOverview, DashboardService};
use crate::auth::{UserExtension, UserHeader};
use crate::error::ApiError;
use crate::server::AppState;

/// Aggregate overview; `null` until the couple has onboarded
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    security(("bearer_auth" = [])),
    params(UserHeader),
    responses(
        (status = 200, description = "Dashboard overview, or null before onboarding", body = Option<DashboardOverview>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: UserExtension,
) -> Result<Json<Option<DashboardOverview>>, ApiError> {
    let overview = DashboardService::new(&state.db).overview(user.id()).await?;
    Ok(Json(overview))
}
