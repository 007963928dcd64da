#![allow(dead_code)]

use chrono::Duration;
use rand::RngCore;
use std::sync::Arc;

use todo_auth::domain::{Email, NewUser, Password, SessionStore, SessionTtl, UserDirectory, UserRecord};
use todo_auth::services::{
    AuthService, HashmapSessionStore, HashmapUserDirectory, MockEmailClient, TokenCodec,
    TokenService,
};

pub const PASSWORD: &str = "Sup3r$ecret";
pub const ISSUER: &str = "auth-service";

pub fn random_secret() -> Vec<u8> {
    let mut secret = vec![0u8; 32];
    rand::rng().fill_bytes(&mut secret);
    secret
}

pub fn codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(ISSUER, &random_secret(), &random_secret()))
}

pub fn session_ttl() -> SessionTtl {
    SessionTtl {
        default_ttl: Duration::hours(1),
        remember_me_ttl: Duration::days(30),
    }
}

pub fn memory_store() -> Arc<HashmapSessionStore> {
    Arc::new(HashmapSessionStore::new(session_ttl()))
}

pub fn token_service(codec: Arc<TokenCodec>, store: Arc<dyn SessionStore>) -> TokenService {
    TokenService::new(
        codec,
        store,
        Duration::minutes(15),
        Duration::days(30),
        Duration::seconds(300),
    )
}

pub fn random_username() -> String {
    format!("user_{}", &uuid::Uuid::new_v4().simple().to_string()[..12])
}

pub fn new_user(username: &str, email: &str) -> NewUser {
    NewUser::new(
        username.to_owned(),
        "Test".to_owned(),
        "User".to_owned(),
        Email::parse(email.to_owned()).expect("valid email"),
        Password::parse(PASSWORD.to_owned()).expect("valid password"),
    )
}

/// Everything an `AuthService` needs, in memory, with handles kept for
/// inspection.
pub struct Fixture {
    pub codec: Arc<TokenCodec>,
    pub store: Arc<HashmapSessionStore>,
    pub users: Arc<HashmapUserDirectory>,
    pub email: Arc<MockEmailClient>,
    pub tokens: TokenService,
    pub auth: Arc<AuthService>,
}

impl Fixture {
    pub fn new() -> Self {
        let codec = codec();
        let store = memory_store();
        let users = Arc::new(HashmapUserDirectory::new());
        let email = Arc::new(MockEmailClient::new());
        let tokens = token_service(codec.clone(), store.clone());
        let auth = Arc::new(AuthService::new(
            tokens.clone(),
            store.clone(),
            users.clone(),
            email.clone(),
            Duration::hours(24),
        ));

        Self {
            codec,
            store,
            users,
            email,
            tokens,
            auth,
        }
    }

    /// A user that already went through activation.
    pub async fn active_user(&self) -> UserRecord {
        let username = random_username();
        let email = format!("{username}@example.com");
        let user = self
            .users
            .create_user(new_user(&username, &email))
            .await
            .expect("user created");
        self.users
            .set_active(user.id, true)
            .await
            .expect("user activated")
    }
}
