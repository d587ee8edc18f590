use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::users::domain::UserId;

#[derive(Debug, derive_more::Error, derive_more::Display)]
pub(crate) enum RepositoryError {
    #[display("No user with id {id}")]
    UserNotFound { id: UserId },

    #[display("A user with id {id} already exists")]
    UserAlreadyExists { id: UserId },

    #[display("User id {body} does not match the path id {path}")]
    MismatchedId { path: UserId, body: UserId },
}

/// API error response returned for all error cases
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for RepositoryError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Self::UserNotFound { .. } => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists { .. } => StatusCode::CONFLICT,
            Self::MismatchedId { .. } => StatusCode::BAD_REQUEST,
        };
        let message = self.to_string();

        let error_response = ApiErrorResponse { message };

        (status, Json(error_response)).into_response()
    }
}
