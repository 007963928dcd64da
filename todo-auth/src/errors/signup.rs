use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignupError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("password must be between 8 and 128 characters long, contain at least one uppercase letter and one special character.")]
    InvalidPassword,

    #[error("username must be 3 to 32 letters, digits, dots, dashes or underscores")]
    InvalidUsername,

    #[error("User {0} already exists")]
    UserAlreadyExists(String),

    #[error("Service temporarily unavailable, please try again later.")]
    ServiceUnavailable,

    #[error("Something went wrong, please try again later.")]
    InternalServerError,
}

impl IntoResponse for SignupError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            SignupError::InvalidEmail => StatusCode::BAD_REQUEST,
            SignupError::InvalidPassword => StatusCode::BAD_REQUEST,
            SignupError::InvalidUsername => StatusCode::BAD_REQUEST,
            SignupError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            SignupError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            SignupError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
