use thiserror::Error;

use super::{Email, EmailKind};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmailClientError {
    #[error("email service unavailable: {0}")]
    Unavailable(String),
    #[error("email service rejected the message: {0}")]
    Rejected(String),
}

/// Hand-off to the email notifier. Delivery itself happens elsewhere.
#[async_trait::async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        token: &str,
        kind: EmailKind,
    ) -> Result<(), EmailClientError>;
}
