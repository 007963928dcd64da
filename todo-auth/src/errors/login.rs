use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::domain::UserDirectoryError;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Activate account")]
    ActivateAccount,

    #[error("Service temporarily unavailable, please try again later.")]
    ServiceUnavailable,

    #[error("Something went wrong, please try again later.")]
    InternalServerError,
}

impl From<UserDirectoryError> for LoginError {
    fn from(e: UserDirectoryError) -> Self {
        match e {
            UserDirectoryError::NotFound | UserDirectoryError::Unauthorized => {
                LoginError::InvalidCredentials
            }
            UserDirectoryError::Unavailable(_) => LoginError::ServiceUnavailable,
            _ => LoginError::InternalServerError,
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            LoginError::ActivateAccount => StatusCode::UNAUTHORIZED,
            LoginError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            LoginError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
