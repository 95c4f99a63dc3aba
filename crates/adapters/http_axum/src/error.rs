//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use wirelessmesh_domain::error::{MeshError, Rejection};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`MeshError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(MeshError);

impl From<MeshError> for ApiError {
    fn from(err: MeshError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            MeshError::Rejected(Rejection::Validation(_)) => StatusCode::BAD_REQUEST,
            MeshError::Rejected(Rejection::NotFound(_)) => StatusCode::NOT_FOUND,
            MeshError::Rejected(Rejection::AlreadyExists) | MeshError::Conflict { .. } => {
                StatusCode::CONFLICT
            }
            MeshError::Storage(_) | MeshError::Integration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = ?self.0, "request failed");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
