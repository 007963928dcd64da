use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::domain::{SessionStoreError, UserDirectoryError};
use crate::utils::INVALID_TOKEN_MESSAGE;

#[derive(Error, Debug)]
pub enum RecoveryError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("password must be between 8 and 128 characters long, contain at least one uppercase letter and one special character.")]
    InvalidPassword,

    #[error("User not found")]
    UserNotFound,

    #[error("Recovery email could not be sent")]
    EmailNotSent,

    #[error("{}", INVALID_TOKEN_MESSAGE)]
    InvalidToken,

    #[error("Service temporarily unavailable, please try again later.")]
    ServiceUnavailable,

    #[error("Something went wrong, please try again later.")]
    InternalServerError,
}

impl From<SessionStoreError> for RecoveryError {
    fn from(e: SessionStoreError) -> Self {
        match e {
            SessionStoreError::Unavailable(_) => RecoveryError::ServiceUnavailable,
            _ => RecoveryError::InvalidToken,
        }
    }
}

impl From<UserDirectoryError> for RecoveryError {
    fn from(e: UserDirectoryError) -> Self {
        match e {
            UserDirectoryError::NotFound => RecoveryError::UserNotFound,
            UserDirectoryError::Unavailable(_) => RecoveryError::ServiceUnavailable,
            _ => RecoveryError::InternalServerError,
        }
    }
}

impl IntoResponse for RecoveryError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            RecoveryError::InvalidEmail => StatusCode::BAD_REQUEST,
            RecoveryError::InvalidPassword => StatusCode::BAD_REQUEST,
            RecoveryError::UserNotFound => StatusCode::NOT_FOUND,
            RecoveryError::EmailNotSent => StatusCode::BAD_REQUEST,
            RecoveryError::InvalidToken => StatusCode::UNAUTHORIZED,
            RecoveryError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            RecoveryError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
