use async_trait::async_trait;
use log::{error, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use std::time::Duration;

use crate::domain::{NewUser, Password, UserDirectory, UserDirectoryError, UserRecord};

#[derive(Serialize)]
struct CredentialsBody<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CreateUserBody<'a> {
    username: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(untagged)]
enum UserPatch<'a> {
    Activation { is_active: bool },
    Password { password: &'a str },
}

/// Client of the user service. Every call is bounded by the configured
/// outbound timeout; transport failures and timeouts read as `Unavailable`.
pub struct HttpUserDirectory {
    http_client: Client,
    base_url: String,
}

impl HttpUserDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UserDirectoryError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UserDirectoryError::Unexpected(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<UserRecord, UserDirectoryError> {
        let response = request.send().await.map_err(|e| {
            warn!("User service request failed: {e}");
            UserDirectoryError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<UserRecord>()
                .await
                .map_err(|e| UserDirectoryError::Unexpected(e.to_string()));
        }

        Err(match status {
            StatusCode::NOT_FOUND => UserDirectoryError::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => UserDirectoryError::Unauthorized,
            StatusCode::CONFLICT => UserDirectoryError::AlreadyExists,
            s if s.is_server_error() => {
                error!("User service answered {s}");
                UserDirectoryError::Unavailable(format!("user service answered {s}"))
            }
            s => UserDirectoryError::Unexpected(format!("user service answered {s}")),
        })
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn find_user_by_identity(
        &self,
        identifier: &str,
    ) -> Result<UserRecord, UserDirectoryError> {
        let request = self
            .http_client
            .get(format!("{}/user/crud/search", self.base_url))
            .query(&[("identifier", identifier)]);
        self.send(request).await
    }

    async fn authenticate_user(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<UserRecord, UserDirectoryError> {
        let request = self
            .http_client
            .post(format!("{}/user/authenticate", self.base_url))
            .json(&CredentialsBody {
                identifier,
                password,
            });
        self.send(request).await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord, UserDirectoryError> {
        let request = self
            .http_client
            .post(format!("{}/user/crud", self.base_url))
            .json(&CreateUserBody {
                username: &new_user.username,
                first_name: &new_user.first_name,
                last_name: &new_user.last_name,
                email: new_user.email.as_ref(),
                password: new_user.password.as_ref(),
            });
        self.send(request).await
    }

    async fn set_active(
        &self,
        user_id: i64,
        active: bool,
    ) -> Result<UserRecord, UserDirectoryError> {
        let request = self
            .http_client
            .patch(format!("{}/user/crud/{user_id}", self.base_url))
            .json(&UserPatch::Activation { is_active: active });
        self.send(request).await
    }

    async fn update_password(
        &self,
        user_id: i64,
        password: &Password,
    ) -> Result<UserRecord, UserDirectoryError> {
        let request = self
            .http_client
            .patch(format!("{}/user/crud/{user_id}", self.base_url))
            .json(&UserPatch::Password {
                password: password.as_ref(),
            });
        self.send(request).await
    }
}
