use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tokio::spawn;

use todo_auth::app_router;
use todo_auth::app_state::AppState;
use todo_auth::domain::{EmailKind, SignupRequestBody, TokenResponse, UserRecord};
use todo_auth::services::{HashmapSessionStore, MockEmailClient};

use crate::common::{self, Fixture, PASSWORD};

#[derive(Serialize)]
pub struct LoginBody {
    pub identifier: String,
    pub password: String,
    pub remember_me: bool,
}

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub store: Arc<HashmapSessionStore>,
    pub email: Arc<MockEmailClient>,
    pub fixture: Fixture,
}

impl TestApp {
    pub async fn new() -> Self {
        let fixture = Fixture::new();
        let app_state = AppState::new(fixture.store.clone(), fixture.auth.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed binding to an ephemeral port");

        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server = axum::serve(listener, app_router(app_state));

        spawn(async move {
            if let Err(e) = server.await {
                eprintln!("Test server error: {}", e);
            }
        });

        TestApp {
            address,
            http_client: Client::new(),
            store: fixture.store.clone(),
            email: fixture.email.clone(),
            fixture,
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Response {
        let body = SignupRequestBody {
            username: username.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };

        self.http_client
            .post(format!("{}/auth/register", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute register request.")
    }

    pub async fn activate_account(&self, token: &str) -> Response {
        self.http_client
            .post(format!("{}/auth/activate_account", &self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute activation request.")
    }

    pub async fn login(&self, identifier: &str, password: &str, remember_me: bool) -> Response {
        let body = LoginBody {
            identifier: identifier.to_owned(),
            password: password.to_owned(),
            remember_me,
        };

        self.http_client
            .post(format!("{}/auth/login", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute login request.")
    }

    pub async fn logout(&self, token: Option<&str>) -> Response {
        let request = self
            .http_client
            .post(format!("{}/auth/logout", &self.address));
        with_bearer(request, token)
            .send()
            .await
            .expect("Failed to execute logout request.")
    }

    pub async fn check_auth(&self, token: Option<&str>) -> Response {
        let request = self
            .http_client
            .get(format!("{}/auth/check_auth", &self.address));
        with_bearer(request, token)
            .send()
            .await
            .expect("Failed to execute check_auth request.")
    }

    pub async fn get_forgot_password_email(&self, email: &str) -> Response {
        self.http_client
            .get(format!(
                "{}/auth/get_forgot_password_email/{}",
                &self.address, email
            ))
            .send()
            .await
            .expect("Failed to execute recovery request.")
    }

    pub async fn forgot_password(&self, token: &str, password: &str) -> Response {
        self.http_client
            .post(format!("{}/auth/forgot_password", &self.address))
            .bearer_auth(token)
            .json(&json!({ "password": password }))
            .send()
            .await
            .expect("Failed to execute password reset request.")
    }

    pub async fn my_sessions(&self, token: &str) -> Response {
        self.http_client
            .get(format!("{}/session/crud/me", &self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute session listing request.")
    }

    pub async fn delete_session(&self, token: &str, session_id: &str) -> Response {
        self.http_client
            .delete(format!("{}/session/crud/{}", &self.address, session_id))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute session delete request.")
    }

    /// Register, activate and log in a fresh user.
    pub async fn logged_in_user(&self, remember_me: bool) -> (UserRecord, TokenResponse) {
        let username = common::random_username();
        let email = format!("{username}@example.com");

        let response = self.register(&username, &email, PASSWORD).await;
        assert_eq!(response.status().as_u16(), 201);
        let link = self
            .email
            .last_token_for(&email, EmailKind::RegisterEmail)
            .await
            .expect("activation email sent");
        let user = self
            .activate_account(&link)
            .await
            .json::<UserRecord>()
            .await
            .expect("Could not deserialize activated user");

        let tokens = self
            .login(&username, PASSWORD, remember_me)
            .await
            .json::<TokenResponse>()
            .await
            .expect("Could not deserialize login response");
        (user, tokens)
    }
}

fn with_bearer(request: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}
