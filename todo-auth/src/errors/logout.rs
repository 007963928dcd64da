use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::utils::INVALID_TOKEN_MESSAGE;

#[derive(Error, Debug)]
pub enum LogoutError {
    #[error("Something went wrong, please try again later.")]
    InternalServerError,

    #[error("{}", INVALID_TOKEN_MESSAGE)]
    InvalidToken,
}

impl IntoResponse for LogoutError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            LogoutError::InvalidToken => StatusCode::UNAUTHORIZED,
            LogoutError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
