use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::domain::{SessionStoreError, UserDirectoryError};
use crate::utils::INVALID_TOKEN_MESSAGE;

#[derive(Error, Debug)]
pub enum ActivationError {
    /// Forged, expired or already consumed activation link.
    #[error("{}", INVALID_TOKEN_MESSAGE)]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Service temporarily unavailable, please try again later.")]
    ServiceUnavailable,

    #[error("Something went wrong, please try again later.")]
    InternalServerError,
}

impl From<SessionStoreError> for ActivationError {
    fn from(e: SessionStoreError) -> Self {
        match e {
            SessionStoreError::Unavailable(_) => ActivationError::ServiceUnavailable,
            _ => ActivationError::InvalidToken,
        }
    }
}

impl From<UserDirectoryError> for ActivationError {
    fn from(e: UserDirectoryError) -> Self {
        match e {
            UserDirectoryError::NotFound => ActivationError::UserNotFound,
            UserDirectoryError::Unavailable(_) => ActivationError::ServiceUnavailable,
            _ => ActivationError::InternalServerError,
        }
    }
}

impl IntoResponse for ActivationError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            ActivationError::InvalidToken => StatusCode::UNAUTHORIZED,
            ActivationError::UserNotFound => StatusCode::NOT_FOUND,
            ActivationError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ActivationError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
