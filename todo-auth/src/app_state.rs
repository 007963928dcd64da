use std::sync::Arc;

use crate::domain::SessionStore;
use crate::services::AuthService;

// Using type aliases to improve readability!
pub type SessionStoreType = Arc<dyn SessionStore>;
pub type AuthServiceType = Arc<AuthService>;

#[derive(Clone)]
pub struct AppState {
    pub session_store: SessionStoreType,
    pub auth_service: AuthServiceType,
}

impl AppState {
    pub fn new(session_store: SessionStoreType, auth_service: AuthServiceType) -> Self {
        Self {
            session_store,
            auth_service,
        }
    }
}
