//! Error types for Reward API.
//!
//! Every failure leaves the server as `{"description": "..."}` with a
//! matching status code.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reward_store::StoreError;
use serde::Serialize;
use tracing::error;

pub const INVALID_RECEIPT: &str = "The receipt is invalid";
pub const RECEIPT_NOT_FOUND: &str = "No receipt found for that id";
pub const ROUTE_NOT_FOUND: &str = "the requested resource could not be found";
pub const RATE_LIMITED: &str = "rate limit exceeded";
pub const SERVER_ERROR: &str =
    "the server encountered a problem and could not process your request";

/// Reward API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("the {0} method is not supported for this resource")]
    MethodNotAllowed(Method),

    #[error("rate limit exceeded")]
    RateLimited,

    /// The cause is logged, never sent to the client.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_receipt() -> Self {
        ApiError::BadRequest(INVALID_RECEIPT)
    }

    pub fn receipt_not_found() -> Self {
        ApiError::NotFound(RECEIPT_NOT_FOUND)
    }

    pub fn route_not_found() -> Self {
        ApiError::NotFound(ROUTE_NOT_FOUND)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    description: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let description = match self {
            ApiError::Internal(cause) => {
                error!(%cause, "Request failed");
                SERVER_ERROR.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { description })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { .. } => ApiError::receipt_not_found(),
            StoreError::Duplicate { .. } | StoreError::LockPoisoned => {
                ApiError::Internal(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn description(error: ApiError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json["description"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_envelopes() {
        assert_eq!(
            description(ApiError::invalid_receipt()).await,
            (StatusCode::BAD_REQUEST, INVALID_RECEIPT.to_string())
        );
        assert_eq!(
            description(ApiError::receipt_not_found()).await,
            (StatusCode::NOT_FOUND, RECEIPT_NOT_FOUND.to_string())
        );
        assert_eq!(
            description(ApiError::MethodNotAllowed(Method::PUT)).await,
            (
                StatusCode::METHOD_NOT_ALLOWED,
                "the PUT method is not supported for this resource".to_string()
            )
        );
        assert_eq!(
            description(ApiError::RateLimited).await,
            (StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED.to_string())
        );
    }

    #[tokio::test]
    async fn test_internal_hides_cause() {
        let (status, text) = description(ApiError::Internal("lock poisoned".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text, SERVER_ERROR);
    }

    #[test]
    fn test_from_store_error() {
        assert!(matches!(
            ApiError::from(StoreError::not_found("abc")),
            ApiError::NotFound(RECEIPT_NOT_FOUND)
        ));
        assert!(matches!(
            ApiError::from(StoreError::duplicate("abc")),
            ApiError::Internal(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::LockPoisoned),
            ApiError::Internal(_)
        ));
    }
}
