//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use virtapi_domain::error::{ModelError, NotFoundError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`ModelError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(ModelError);

impl ApiError {
    /// A lookup that cannot succeed, e.g. a path segment that is not a valid name.
    #[must_use]
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self(ModelError::NotFound(NotFoundError {
            kind,
            name: name.into(),
        }))
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ModelError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ModelError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            ModelError::Source(err) => {
                tracing::error!(error = %err, "source error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
