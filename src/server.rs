//! # Server Configuration
//!
//! This module contains the router, shared state and OpenAPI document for the
//! wedding planner API.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_middleware;
use crate::config::AppConfig;
use crate::handlers::{self, dashboard, events, households, public, user};
use crate::telemetry::trace_context_middleware;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/user",
            post(user::onboard_user)
                .get(user::get_user)
                .patch(user::update_user),
        )
        .route(
            "/website",
            get(user::get_website).patch(user::update_website),
        )
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/{id}",
            patch(events::update_event).delete(events::delete_event),
        )
        .route("/questions", post(events::upsert_question))
        .route("/questions/{id}", delete(events::delete_question))
        .route(
            "/households",
            get(households::list_households).post(households::create_household),
        )
        .route(
            "/households/{id}",
            put(households::update_household).delete(households::delete_household),
        )
        .route("/guests", get(households::list_guests))
        .route("/invitations", get(households::list_invitations))
        .route(
            "/invitations/{guest_id}/{event_id}",
            patch(households::update_invitation),
        )
        .route(
            "/tags",
            get(households::list_tags).post(households::create_tag),
        )
        .route("/tags/{id}", delete(households::delete_tag))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/websites/{sub_url}", get(public::get_public_website))
        .route("/websites/{sub_url}/rsvp/lookup", post(public::lookup_rsvp))
        .route("/websites/{sub_url}/rsvp", post(public::submit_rsvp));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .nest("/api/v1", protected)
        .nest("/public", public_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = config
        .bind_addr()
        .with_context(|| format!("Invalid server address: {}", config.api_bind_addr))?;
    let profile = config.profile.clone();

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::user::onboard_user,
        crate::handlers::user::get_user,
        crate::handlers::user::update_user,
        crate::handlers::user::get_website,
        crate::handlers::user::update_website,
        crate::handlers::events::list_events,
        crate::handlers::events::create_event,
        crate::handlers::events::update_event,
        crate::handlers::events::delete_event,
        crate::handlers::events::upsert_question,
        crate::handlers::events::delete_question,
        crate::handlers::households::list_households,
        crate::handlers::households::create_household,
        crate::handlers::households::update_household,
        crate::handlers::households::delete_household,
        crate::handlers::households::list_guests,
        crate::handlers::households::list_invitations,
        crate::handlers::households::update_invitation,
        crate::handlers::households::list_tags,
        crate::handlers::households::create_tag,
        crate::handlers::households::delete_tag,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::public::get_public_website,
        crate::handlers::public::lookup_rsvp,
        crate::handlers::public::submit_rsvp,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::RsvpStatus,
            crate::models::QuestionType,
            crate::error::ApiError,
            crate::handlers::HealthStatus,
            crate::models::inputs::OnboardUserInput,
            crate::models::inputs::UpdateUserInput,
            crate::models::inputs::UpdateWebsiteInput,
            crate::models::inputs::EventInput,
            crate::models::inputs::OptionInput,
            crate::models::inputs::QuestionInput,
            crate::models::inputs::GuestInvitationInput,
            crate::models::inputs::GuestInput,
            crate::models::inputs::GiftInput,
            crate::models::inputs::HouseholdInput,
            crate::models::inputs::UpdateInvitationInput,
            crate::models::inputs::TagInput,
            crate::models::inputs::RsvpLookupInput,
            crate::models::inputs::RsvpResponseInput,
            crate::models::inputs::AnswerInput,
            crate::models::inputs::RsvpSubmissionInput,
            crate::models::views::UserView,
            crate::models::views::WebsiteView,
            crate::models::views::PublicWebsiteView,
            crate::models::views::EventView,
            crate::models::views::QuestionView,
            crate::models::views::OptionView,
            crate::models::views::AnswerView,
            crate::models::views::HouseholdView,
            crate::models::views::GuestView,
            crate::models::views::InvitationView,
            crate::models::views::GiftView,
            crate::models::views::TagView,
            crate::services::user::OnboardedUser,
            crate::application::dashboard::DashboardOverview,
            crate::application::dashboard::EventOverview,
            crate::application::dashboard::RsvpTally,
            crate::application::dashboard::GuestTotals,
            crate::application::rsvp_submission::SubmissionReceipt,
            crate::application::rsvp_wizard::RsvpLookup,
            crate::application::rsvp_wizard::RsvpParty,
            crate::application::rsvp_wizard::WizardStep,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "user", description = "Couple account"),
        (name = "website", description = "Wedding website settings"),
        (name = "events", description = "Wedding events"),
        (name = "questions", description = "RSVP questions"),
        (name = "households", description = "Households and their guest parties"),
        (name = "public", description = "Guest-facing website and RSVP")
    ),
    info(
        title = "Wedding Planner API",
        description = "Households, events, invitations and RSVPs for wedding websites",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
