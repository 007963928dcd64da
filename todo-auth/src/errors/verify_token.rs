use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::services::AccessError;
use crate::utils::INVALID_TOKEN_MESSAGE;

#[derive(Error, Debug)]
pub enum VerifyTokenError {
    #[error("Something went wrong, please try again later.")]
    InternalServerError,

    #[error("Service temporarily unavailable, please try again later.")]
    ServiceUnavailable,

    /// Covers bad signatures, missing sessions and unknown subjects alike.
    #[error("{}", INVALID_TOKEN_MESSAGE)]
    InvalidToken,
}

impl From<AccessError> for VerifyTokenError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::BadSignature | AccessError::NoSession | AccessError::RefreshRejected => {
                VerifyTokenError::InvalidToken
            }
            AccessError::StoreUnavailable(_) => VerifyTokenError::ServiceUnavailable,
            AccessError::Minting(_) => VerifyTokenError::InternalServerError,
        }
    }
}

impl IntoResponse for VerifyTokenError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            VerifyTokenError::InvalidToken => StatusCode::UNAUTHORIZED,
            VerifyTokenError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            VerifyTokenError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
