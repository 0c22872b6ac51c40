//! # Common API Types
//!
//! Shared extractors and response wrappers used across handlers.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::inputs::Validate;

/// JSON body that has been deserialized and passed field validation.
///
/// Malformed bodies become `VALIDATION_FAILED` through the `JsonRejection`
/// mapping; field errors are reported per field in `details`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Wrapper for list endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inputs::TagInput;
    use axum::{body::Body, http::StatusCode};

    async fn extract(body: &str) -> Result<ValidatedJson<TagInput>, ApiError> {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        ValidatedJson::<TagInput>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let ValidatedJson(tag) = extract(r##"{"name":"Family","color":"#aabbcc"}"##)
            .await
            .unwrap();
        assert_eq!(tag.name, "Family");
    }

    #[tokio::test]
    async fn reports_field_errors() {
        let err = extract(r#"{"name":"  "}"#).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(&*err.code, "VALIDATION_FAILED");
        let details = err.details.unwrap();
        assert!(details.get("name").is_some());
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_failure() {
        let err = extract("{not json").await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(&*err.code, "VALIDATION_FAILED");
    }
}
