//! # Authentication and Authorization
//!
//! Bearer token authentication and user header validation for the couple-facing
//! API, plus the optional password gate on public wedding websites.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ApiError, unauthorized, unauthorized_with_trace_id, validation_error};
use crate::server::AppState;
use crate::telemetry::TraceContext;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const WEBSITE_PASSWORD_HEADER: &str = "X-Website-Password";

/// User (couple account) ID wrapper for type safety
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserId(pub Uuid);

/// Extractor for the authenticated user from request extensions
#[derive(Debug, Clone, Copy)]
pub struct UserExtension(pub UserId);

impl UserExtension {
    pub fn id(&self) -> Uuid {
        self.0.0
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Authentication middleware that validates bearer tokens and the user header
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = request.headers().clone();

    // Reuse the request trace id so auth failures correlate with access logs
    let trace_id = request
        .extensions()
        .get::<TraceContext>()
        .map(|ctx| ctx.trace_id.clone());

    let token = extract_bearer_token(&headers, trace_id.as_deref())?;
    validate_token(&config, token)?;

    let user = extract_user_id(&headers)?;
    tracing::debug!(user_id = %user.0, "Authenticated request");

    let mut request = request;
    request.extensions_mut().insert(UserExtension(user));

    Ok(next.run(request).await)
}

fn extract_bearer_token<'h>(
    headers: &'h HeaderMap,
    trace_id: Option<&str>,
) -> Result<&'h str, ApiError> {
    let reject = |message: &str| match trace_id {
        Some(trace_id) => unauthorized_with_trace_id(Some(message), trace_id.to_string()),
        None => unauthorized(Some(message)),
    };

    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| reject("Missing Authorization header"))?
        .to_str()
        .map_err(|_| reject("Invalid Authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| reject("Authorization header must use Bearer scheme"))
}

fn validate_token(config: &AppConfig, token: &str) -> Result<(), ApiError> {
    let is_valid = config
        .api_tokens
        .iter()
        .any(|configured| secrets_match(token, configured));

    if is_valid {
        Ok(())
    } else {
        Err(unauthorized(Some("Invalid bearer token")))
    }
}

fn extract_user_id(headers: &HeaderMap) -> Result<UserId, ApiError> {
    let header_value = headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| {
            validation_error(
                "Missing required header",
                serde_json::json!({ USER_ID_HEADER: "Required header is missing" }),
            )
        })?
        .to_str()
        .map_err(|_| {
            validation_error(
                "Invalid user header",
                serde_json::json!({ USER_ID_HEADER: "Header must be valid UTF-8" }),
            )
        })?;

    header_value.parse::<Uuid>().map(UserId).map_err(|_| {
        validation_error(
            "Invalid user ID",
            serde_json::json!({ USER_ID_HEADER: "Must be a valid UUID" }),
        )
    })
}

/// Constant-time comparison for tokens and website passwords
pub fn secrets_match(provided: &str, expected: &str) -> bool {
    ConstantTimeEq::ct_eq(provided.as_bytes(), expected.as_bytes()).into()
}

/// OpenAPI header parameter for X-User-Id
#[derive(Debug, Serialize, Deserialize, IntoParams, utoipa::ToSchema)]
#[into_params(parameter_in = Header)]
pub struct UserHeader {
    /// Couple account identifier (UUID) that scopes the request
    #[serde(rename = "X-User-Id")]
    #[param(rename = "X-User-Id", value_type = String)]
    pub user_id: String,
}

/// Password supplied by a visitor of a protected wedding website
#[derive(Debug, Clone, Default)]
pub struct WebsitePassword(pub Option<String>);

/// OpenAPI header parameter for X-Website-Password
#[derive(Debug, Serialize, Deserialize, IntoParams, utoipa::ToSchema)]
#[into_params(parameter_in = Header)]
pub struct WebsitePasswordHeader {
    /// Required when the website has password protection enabled
    #[serde(rename = "X-Website-Password")]
    #[param(rename = "X-Website-Password", value_type = Option<String>)]
    pub password: Option<String>,
}

impl<S> FromRequestParts<S> for UserExtension
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserExtension>()
            .copied()
            .ok_or_else(|| unauthorized(Some("User context missing")))
    }
}

impl<S> FromRequestParts<S> for WebsitePassword
where
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let password = parts
            .headers
            .get(WEBSITE_PASSWORD_HEADER)
            .map(|value| {
                value.to_str().map(str::to_string).map_err(|_| {
                    validation_error(
                        "Invalid website password header",
                        serde_json::json!({ WEBSITE_PASSWORD_HEADER: "Header must be valid UTF-8" }),
                    )
                })
            })
            .transpose()?;
        Ok(WebsitePassword(password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    fn create_test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            api_tokens: vec!["test-token-123".to_string()],
            ..Default::default()
        })
    }

    async fn run_middleware(config: Arc<AppConfig>, request: Request<Body>) -> Response {
        async fn handler(user: UserExtension) -> String {
            user.id().to_string()
        }

        Router::new()
            .route("/test", get(handler))
            .layer(axum::middleware::from_fn_with_state(
                Arc::clone(&config),
                auth_middleware,
            ))
            .with_state(AppState {
                config,
                db: sea_orm::DatabaseConnection::default(),
            })
            .oneshot(request)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn bad_credentials_return_401() {
        for authorization in [None, Some("Basic dGVzdDoxMjM="), Some("Bearer wrong-token")] {
            let mut builder = Request::builder()
                .uri("/test")
                .header(USER_ID_HEADER, Uuid::new_v4().to_string());
            if let Some(value) = authorization {
                builder = builder.header("Authorization", value);
            }

            let request = builder.body(Body::empty()).unwrap();
            let response = run_middleware(create_test_config(), request).await;
            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "authorization {authorization:?}"
            );
        }
    }

    #[tokio::test]
    async fn missing_user_header_returns_400() {
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(create_test_config(), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_user_uuid_returns_400() {
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(create_test_config(), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_request_exposes_user_to_handler() {
        let user_id = Uuid::new_v4();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .header(USER_ID_HEADER, user_id.to_string())
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(create_test_config(), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[tokio::test]
    async fn multiple_tokens_supported() {
        let config = Arc::new(AppConfig {
            api_tokens: vec!["token-one".to_string(), "token-two".to_string()],
            ..Default::default()
        });

        for candidate in ["token-one", "token-two"] {
            let request = Request::builder()
                .uri("/test")
                .header("Authorization", format!("Bearer {}", candidate))
                .header(USER_ID_HEADER, Uuid::new_v4().to_string())
                .body(Body::empty())
                .unwrap();

            let response = run_middleware(Arc::clone(&config), request).await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn website_password_header_is_optional() {
        async fn handler(WebsitePassword(password): WebsitePassword) -> String {
            password.unwrap_or_else(|| "<none>".to_string())
        }
        let app = Router::new().route("/site", get(handler));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/site").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, "<none>".as_bytes());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/site")
                    .header(WEBSITE_PASSWORD_HEADER, "hunter2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, "hunter2".as_bytes());
    }

    #[test]
    fn secrets_match_requires_exact_equality() {
        assert!(secrets_match("open sesame", "open sesame"));
        assert!(!secrets_match("open sesame", "open sesam"));
        assert!(!secrets_match("", "x"));
    }
}
