//! # Tests for Handlers
//!
//! Router-level tests running against an in-memory SQLite database.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::{Json, Response},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::handlers::root;
use crate::server::{AppState, create_app};

const TOKEN: &str = "test-token-123";

async fn test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

async fn test_app() -> Router {
    let config = AppConfig {
        api_tokens: vec![TOKEN.to_string()],
        ..Default::default()
    };
    create_app(AppState {
        config: Arc::new(config),
        db: test_db().await,
    })
}

fn authed(method: &str, uri: &str, user_id: Uuid, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {TOKEN}"))
        .header("X-User-Id", user_id.to_string());
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn onboarding() -> Value {
    json!({
        "groom_first_name": "John",
        "groom_last_name": "Doe",
        "bride_first_name": "Jane",
        "bride_last_name": "Roe"
    })
}

#[tokio::test]
async fn root_returns_service_info() {
    let Json(info) = root().await;
    assert_eq!(info.service, "wedding-planner");
    assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn healthz_reports_database_ok() {
    let response = test_app()
        .await
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn protected_route_without_token_is_rejected() {
    let request = Request::get("/api/v1/dashboard")
        .header("X-User-Id", Uuid::new_v4().to_string())
        .body(Body::empty())
        .unwrap();
    let response = test_app().await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("x-trace-id"));
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn protected_route_without_user_header_is_bad_request() {
    let request = Request::get("/api/v1/events")
        .header("Authorization", format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = test_app().await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_is_null_before_onboarding() {
    let response = test_app()
        .await
        .oneshot(authed("GET", "/api/v1/dashboard", Uuid::new_v4(), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn onboarding_creates_user_and_website() {
    let app = test_app().await;
    let user_id = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(authed("POST", "/api/v1/user", user_id, Some(onboarding())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["website"]["sub_url"], "jane-and-john");
    assert_eq!(body["website"]["is_rsvp_enabled"], true);

    let response = app
        .clone()
        .oneshot(authed("GET", "/api/v1/user", user_id, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["bride_first_name"], "Jane");

    let response = app
        .oneshot(authed("POST", "/api/v1/user", user_id, Some(onboarding())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_household_payload_reports_field_errors() {
    let app = test_app().await;
    let user_id = Uuid::new_v4();
    app.clone()
        .oneshot(authed("POST", "/api/v1/user", user_id, Some(onboarding())))
        .await
        .unwrap();

    let response = app
        .oneshot(authed(
            "POST",
            "/api/v1/households",
            user_id,
            Some(json!({ "guests": [] })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["details"]["guests"].is_string());
}

#[tokio::test]
async fn public_website_is_reachable_without_token() {
    let app = test_app().await;
    app.clone()
        .oneshot(authed("POST", "/api/v1/user", Uuid::new_v4(), Some(onboarding())))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::get("/public/websites/Jane-And-John")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sub_url"], "jane-and-john");

    let response = app
        .oneshot(
            Request::get("/public/websites/nobody-here")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = test_app()
        .await
        .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/public/websites/{sub_url}/rsvp"].is_object());
}
