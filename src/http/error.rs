//! Error-to-response mapping.
//!
//! Central rule table for surfacing failures to HTTP callers:
//!
//! | Condition                   | Status | Body                              |
//! |-----------------------------|--------|-----------------------------------|
//! | input validation failure    | 400    | `{"error": <reason>}`             |
//! | backend never connected     | 503    | `{"error": "service unavailable"}`|
//! | backend call failure/timeout| 500    | `{"error": <backend error text>}` |
//!
//! Nothing is retried; every failure is surfaced on the first attempt.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed validation; no backend call was made.
    #[error("{0}")]
    BadRequest(String),

    /// The backend was never reachable; no backend call was made.
    #[error("service unavailable")]
    Unavailable,

    /// The backend call itself failed or timed out.
    #[error("{0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// `axum::Json` with its rejection mapped onto the error contract.
///
/// The stock extractor answers a type-mismatched field with a plain-text 422
/// and a syntax error with a plain-text 400; both are malformed input to the
/// gateway and must be a 400 with an `{"error": ...}` body.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::time::Duration;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_maps_to_400_with_reason() {
        let response = ApiError::BadRequest("prompt is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "prompt is required");
    }

    #[tokio::test]
    async fn unavailable_maps_to_503() {
        let response = ApiError::Unavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"], "service unavailable");
    }

    #[tokio::test]
    async fn backend_errors_map_to_500() {
        let rpc: ApiError = BackendError::Rpc(tonic::Status::internal("boom")).into();
        let response = rpc.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let timeout: ApiError = BackendError::Timeout {
            route: "completion",
            budget: Duration::from_secs(30),
        }
        .into();
        let response = timeout.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("timed out"));
    }
}
