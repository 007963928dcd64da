use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionStoreError {
    #[error("session not found")]
    NotFound,
    #[error("session token was rotated concurrently")]
    StaleWrite,
    #[error("invalid session: {0}")]
    Invalid(String),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
