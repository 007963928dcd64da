use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use log::info;
use std::future::IntoFuture;
use std::{error::Error, future::Future, pin::Pin, time::Duration};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

use app_state::AppState;
use routes::{login, logout, recovery, sessions, signup, verify_token};
use utils::REQUEST_TIMEOUT_SECONDS;

pub mod app_state;
pub mod domain;
pub mod errors;
pub mod routes;
pub mod services;
pub mod utils;
pub mod validation;

type ServerFuture = Pin<Box<dyn Future<Output = Result<(), std::io::Error>> + Send>>;

pub fn app_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(signup::register))
        .route("/auth/activate_account", post(signup::activate_account))
        .route("/auth/login", post(login::login))
        .route("/auth/logout", post(logout::logout))
        .route("/auth/check_auth", get(verify_token::check_auth))
        .route(
            "/auth/get_forgot_password_email/:email",
            get(recovery::get_forgot_password_email),
        )
        .route("/auth/forgot_password", post(recovery::forgot_password))
        .route("/session/crud", post(sessions::create_session))
        .route("/session/crud/search", get(sessions::search_session))
        .route("/session/crud/me", get(sessions::my_sessions))
        .route("/session/crud/user/:user_id", get(sessions::sessions_of_user))
        .route(
            "/session/crud/:session_id/update_token",
            patch(sessions::update_session_token),
        )
        .route("/session/crud/:session_id", delete(sessions::delete_session))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECONDS)))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

// This struct encapsulates our application-related logic.
pub struct Application {
    http_future: ServerFuture,
    // address is exposed as a public field,
    // so we have access to it in tests.
    pub address: String,
}

impl Application {
    pub async fn build(app_state: AppState, address: &str) -> Result<Self, Box<dyn Error>> {
        let router = app_router(app_state);
        let listener = TcpListener::bind(address).await?;
        let address = format!("http://{}", listener.local_addr()?);

        let http_future = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .into_future();

        Ok(Self {
            http_future: Box::pin(http_future),
            address,
        })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        info!("listening on {}", &self.address);
        self.http_future.await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available: serve until the task is dropped
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
