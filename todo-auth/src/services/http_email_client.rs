use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::domain::{Email, EmailClient, EmailClientError, EmailKind};

#[derive(Serialize)]
struct EmailSignal<'a> {
    message_type: EmailKind,
    token: &'a str,
    email: &'a str,
}

/// Hands activation and recovery links to the email notifier.
pub struct HttpEmailClient {
    http_client: Client,
    send_url: String,
}

impl HttpEmailClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EmailClientError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmailClientError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            send_url: format!("{}/email/send", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl EmailClient for HttpEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        token: &str,
        kind: EmailKind,
    ) -> Result<(), EmailClientError> {
        let response = self
            .http_client
            .post(&self.send_url)
            .json(&EmailSignal {
                message_type: kind,
                token,
                email: recipient.as_ref(),
            })
            .send()
            .await
            .map_err(|e| {
                warn!("Email notifier unreachable: {e}");
                EmailClientError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(if status.is_server_error() {
                EmailClientError::Unavailable(format!("{status}: {body}"))
            } else {
                EmailClientError::Rejected(format!("{status}: {body}"))
            });
        }

        info!("Sent {kind:?} signal for {}", recipient.as_ref());
        Ok(())
    }
}
