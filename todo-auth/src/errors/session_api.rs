use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::VerifyTokenError;
use crate::domain::SessionStoreError;
use crate::utils::INVALID_TOKEN_MESSAGE;

#[derive(Error, Debug)]
pub enum SessionApiError {
    #[error("invalid session request: {0}")]
    BadRequest(String),

    #[error("Session not found")]
    NotFound,

    #[error("Session token was already rotated")]
    StaleToken,

    #[error("{}", INVALID_TOKEN_MESSAGE)]
    InvalidToken,

    #[error("Service temporarily unavailable, please try again later.")]
    ServiceUnavailable,

    #[error("Something went wrong, please try again later.")]
    InternalServerError,
}

impl From<SessionStoreError> for SessionApiError {
    fn from(e: SessionStoreError) -> Self {
        match e {
            SessionStoreError::NotFound => SessionApiError::NotFound,
            SessionStoreError::StaleWrite => SessionApiError::StaleToken,
            SessionStoreError::Invalid(reason) => SessionApiError::BadRequest(reason),
            SessionStoreError::Unavailable(_) => SessionApiError::ServiceUnavailable,
        }
    }
}

impl From<VerifyTokenError> for SessionApiError {
    fn from(e: VerifyTokenError) -> Self {
        match e {
            VerifyTokenError::InvalidToken => SessionApiError::InvalidToken,
            VerifyTokenError::ServiceUnavailable => SessionApiError::ServiceUnavailable,
            VerifyTokenError::InternalServerError => SessionApiError::InternalServerError,
        }
    }
}

impl IntoResponse for SessionApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            SessionApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            SessionApiError::NotFound => StatusCode::NOT_FOUND,
            SessionApiError::StaleToken => StatusCode::CONFLICT,
            SessionApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            SessionApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            SessionApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
