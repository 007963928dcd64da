use async_trait::async_trait;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::domain::{Email, EmailClient, EmailClientError, EmailKind};

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub recipient: String,
    pub token: String,
    pub kind: EmailKind,
}

/// Records every send instead of delivering it.
#[derive(Default)]
pub struct MockEmailClient {
    sent: Mutex<Vec<SentEmail>>,
    failing: AtomicBool,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail with `Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }

    pub async fn last_token_for(&self, recipient: &str, kind: EmailKind) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|e| e.recipient == recipient && e.kind == kind)
            .map(|e| e.token.clone())
    }
}

#[async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        token: &str,
        kind: EmailKind,
    ) -> Result<(), EmailClientError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EmailClientError::Unavailable("mock email client is failing".into()));
        }

        info!("Mock email {kind:?} to {}", recipient.as_ref());
        self.sent.lock().await.push(SentEmail {
            recipient: recipient.as_ref().to_owned(),
            token: token.to_owned(),
            kind,
        });
        Ok(())
    }
}
