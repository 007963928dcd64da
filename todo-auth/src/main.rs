use log::{error, info};
use std::sync::Arc;
use todo_auth::app_state::{AppState, SessionStoreType};
use todo_auth::domain::SessionTtl;
use todo_auth::services::{
    AuthService, HttpEmailClient, HttpUserDirectory, RedisService, RedisSessionStore,
    SessionSweeper, TokenCodec, TokenService,
};
use todo_auth::utils::Config;
use todo_auth::Application;

#[tokio::main]
async fn main() {
    env_logger::init();
    let config = Config::default().expect("Failed to load config");

    let redis_service =
        Arc::new(RedisService::new(config.redis_host()).expect("Invalid Redis address"));
    redis_service
        .ping()
        .await
        .expect("Session store is not reachable");
    let session_store: SessionStoreType = Arc::new(RedisSessionStore::new(
        redis_service,
        SessionTtl::from_config(&config),
    ));

    let user_directory = Arc::new(
        HttpUserDirectory::new(config.user_service_url(), config.outbound_timeout())
            .expect("Failed to build user service client"),
    );
    let email_client = Arc::new(
        HttpEmailClient::new(config.email_service_url(), config.outbound_timeout())
            .expect("Failed to build email client"),
    );

    let codec = Arc::new(TokenCodec::from_config(&config));
    let token_service = TokenService::from_config(&config, codec, session_store.clone());
    let auth_service = Arc::new(AuthService::from_config(
        &config,
        token_service,
        session_store.clone(),
        user_directory,
        email_client,
    ));

    let sweeper = SessionSweeper::new(session_store.clone(), config.sweep_interval()).start();

    let app_state = AppState::new(session_store, auth_service);
    let app = Application::build(app_state, config.listen_address())
        .await
        .expect("Failed to build app");

    let result = app.run().await;
    sweeper.abort();
    match result {
        Ok(()) => info!("server stopped"),
        Err(e) => error!("server failed: {e}"),
    }
}
