//! # Event and Question Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::auth::{UserExtension, UserHeader};
use crate::error::ApiError;
use crate::handlers::types::{ListResponse, ValidatedJson};
use crate::models::inputs::{EventInput, QuestionInput};
use crate::models::views::{EventView, QuestionView};
use crate::server::AppState;
use crate::services::{EventService, QuestionService};

#[utoipa::path(
    get,
    path = "/api/v1/events",
    security(("bearer_auth" = [])),
    params(UserHeader),
    responses(
        (status = 200, description = "Events with their questions", body = ListResponse<EventView>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    user: UserExtension,
) -> Result<Json<ListResponse<EventView>>, ApiError> {
    let events = EventService::new(&state.db).list(user.id()).await?;
    Ok(Json(events.into()))
}

/// Create an event; every existing guest receives a `Not Invited` invitation
#[utoipa::path(
    post,
    path = "/api/v1/events",
    security(("bearer_auth" = [])),
    params(UserHeader),
    request_body = EventInput,
    responses(
        (status = 201, description = "Event created", body = EventView),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    user: UserExtension,
    ValidatedJson(input): ValidatedJson<EventInput>,
) -> Result<(StatusCode, Json<EventView>), ApiError> {
    let txn = state.db.begin().await?;
    let event = EventService::new(&txn).create(user.id(), &input).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}",
    security(("bearer_auth" = [])),
    params(UserHeader, ("id" = Uuid, Path, description = "Event UUID")),
    request_body = EventInput,
    responses(
        (status = 200, description = "Event updated", body = EventView),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 403, description = "Event belongs to another user", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    user: UserExtension,
    Path(event_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<EventInput>,
) -> Result<Json<EventView>, ApiError> {
    let event = EventService::new(&state.db)
        .update(user.id(), event_id, &input)
        .await?;
    Ok(Json(event))
}

/// Delete an event with its invitations, gifts and questions
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    security(("bearer_auth" = [])),
    params(UserHeader, ("id" = Uuid, Path, description = "Event UUID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 403, description = "Event belongs to another user", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError)
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    user: UserExtension,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let txn = state.db.begin().await?;
    EventService::new(&txn).delete(user.id(), event_id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Create or update a question together with its options
#[utoipa::path(
    post,
    path = "/api/v1/questions",
    security(("bearer_auth" = [])),
    params(UserHeader),
    request_body = QuestionInput,
    responses(
        (status = 200, description = "Question saved", body = QuestionView),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 403, description = "Parent or question belongs to another user", body = ApiError),
        (status = 404, description = "Parent, question or option not found", body = ApiError)
    ),
    tag = "questions"
)]
pub async fn upsert_question(
    State(state): State<AppState>,
    user: UserExtension,
    ValidatedJson(input): ValidatedJson<QuestionInput>,
) -> Result<Json<QuestionView>, ApiError> {
    let txn = state.db.begin().await?;
    let question = QuestionService::new(&txn).upsert(user.id(), &input).await?;
    txn.commit().await?;

    Ok(Json(question))
}

#[utoipa::path(
    delete,
    path = "/api/v1/questions/{id}",
    security(("bearer_auth" = [])),
    params(UserHeader, ("id" = Uuid, Path, description = "Question UUID")),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 403, description = "Question belongs to another user", body = ApiError),
        (status = 404, description = "Question not found", body = ApiError)
    ),
    tag = "questions"
)]
pub async fn delete_question(
    State(state): State<AppState>,
    user: UserExtension,
    Path(question_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let txn = state.db.begin().await?;
    QuestionService::new(&txn)
        .delete(user.id(), question_id)
        .await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
