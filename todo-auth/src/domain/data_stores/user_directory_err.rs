use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UserDirectoryError {
    #[error("user not found")]
    NotFound,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("user already exists")]
    AlreadyExists,
    #[error("user service unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected user service response: {0}")]
    Unexpected(String),
}
