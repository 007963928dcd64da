use chrono::Duration;
use log::{error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::token_service::{AccessError, TokenService};
use crate::domain::{
    AuthResponse, Email, EmailClient, EmailKind, LoginRequestBody, LogoutOutcome, NewSession,
    NewUser, Password, Session, SessionStore, SessionStoreError, TokenKind, TokenResponse,
    UserDirectory, UserDirectoryError, UserRecord, VerifiedAccess,
};
use crate::errors::{
    ActivationError, LoginError, LogoutError, RecoveryError, SessionApiError, SignupError,
    VerifyTokenError,
};
use crate::utils::Config;

const BEARER: &str = "bearer";

/// Session lifecycle: registration, activation, login, logout and password
/// recovery, plus the caller-scoped session views.
pub struct AuthService {
    token_service: TokenService,
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserDirectory>,
    email_client: Arc<dyn EmailClient>,
    activation_ttl: Duration,
}

impl AuthService {
    pub fn new(
        token_service: TokenService,
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserDirectory>,
        email_client: Arc<dyn EmailClient>,
        activation_ttl: Duration,
    ) -> Self {
        AuthService {
            token_service,
            sessions,
            users,
            email_client,
            activation_ttl,
        }
    }

    pub fn from_config(
        config: &Config,
        token_service: TokenService,
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserDirectory>,
        email_client: Arc<dyn EmailClient>,
    ) -> Self {
        Self::new(
            token_service,
            sessions,
            users,
            email_client,
            config.activation_ttl(),
        )
    }

    /// Mint a single-use link token for `user` and back it with a session
    /// living as long as the token.
    async fn open_link_session(&self, user: &UserRecord) -> Result<String, AccessError> {
        let minted = self
            .token_service
            .codec()
            .mint(&user.email, TokenKind::Access, self.activation_ttl)?;
        let session = self
            .sessions
            .create(NewSession::new(user.id, minted.token.clone()).expiring_in(self.activation_ttl))
            .await?;
        info!(
            "Opened link session {} for user {}",
            session.session_id, user.id
        );
        Ok(minted.token)
    }

    async fn notify(&self, user: &UserRecord, token: &str, kind: EmailKind) -> bool {
        let Ok(email) = Email::parse(user.email.clone()) else {
            warn!("User {} has an unusable email address", user.id);
            return false;
        };
        match self.email_client.send_email(&email, token, kind).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to send {kind:?} email to user {}: {e}", user.id);
                false
            }
        }
    }

    /// Resolve a link token to its session and user. The session must still
    /// exist, which is what makes links single-use.
    async fn redeem_link(
        &self,
        token: &str,
    ) -> Result<(Session, UserRecord), LinkError> {
        let claims = self
            .token_service
            .codec()
            .decode(token, TokenKind::Access)
            .map_err(|_| LinkError::InvalidToken)?;
        let session = self
            .sessions
            .find_by_token(token, TokenKind::Access)
            .await
            .map_err(LinkError::Store)?;
        let user = self
            .users
            .find_user_by_identity(&claims.sub)
            .await
            .map_err(LinkError::Users)?;
        if user.id != session.user_id {
            warn!(
                "Link session {} belongs to user {}, token names user {}",
                session.session_id, session.user_id, user.id
            );
            return Err(LinkError::InvalidToken);
        }
        Ok((session, user))
    }

    async fn consume_link(&self, session_id: Uuid) {
        if let Err(e) = self.sessions.delete_by_id(session_id).await {
            warn!("Failed to delete link session {session_id}: {e}");
        }
    }

    pub async fn register(&self, new_user: NewUser) -> Result<UserRecord, SignupError> {
        let email = new_user.email.as_ref().to_owned();
        let user = self
            .users
            .create_user(new_user)
            .await
            .map_err(|e| match e {
                UserDirectoryError::AlreadyExists => SignupError::UserAlreadyExists(email),
                UserDirectoryError::Unavailable(_) => SignupError::ServiceUnavailable,
                _ => SignupError::InternalServerError,
            })?;
        info!("Registered user {}", user.id);

        let token = self.open_link_session(&user).await.map_err(|e| {
            error!("Could not open activation session for user {}: {e}", user.id);
            match e {
                AccessError::StoreUnavailable(_) => SignupError::ServiceUnavailable,
                _ => SignupError::InternalServerError,
            }
        })?;

        self.notify(&user, &token, EmailKind::RegisterEmail).await;
        Ok(user)
    }

    pub async fn activate_account(&self, token: &str) -> Result<UserRecord, ActivationError> {
        let (session, user) = self.redeem_link(token).await?;
        let user = self.users.set_active(user.id, true).await?;
        self.consume_link(session.session_id).await;
        info!("Activated user {}", user.id);
        Ok(user)
    }

    pub async fn login(&self, form: LoginRequestBody) -> Result<TokenResponse, LoginError> {
        let user = self
            .users
            .authenticate_user(&form.identifier, &form.password)
            .await?;

        if !user.is_active {
            self.reissue_activation(&user).await;
            return Err(LoginError::ActivateAccount);
        }

        let access = self
            .token_service
            .mint_access(&user.email)
            .map_err(|_| LoginError::InternalServerError)?;
        let refresh = match form.remember_me {
            true => Some(
                self.token_service
                    .mint_refresh(&user.email)
                    .map_err(|_| LoginError::InternalServerError)?,
            ),
            false => None,
        };

        let new_session = NewSession::new(user.id, access.token.clone())
            .with_refresh_token(refresh.map(|r| r.token))
            .with_client(form.device, form.ip_address);

        let session = self.sessions.create(new_session).await.map_err(|e| {
            error!("Login of user {} failed at session creation: {e}", user.id);
            match e {
                SessionStoreError::Unavailable(_) => LoginError::ServiceUnavailable,
                _ => LoginError::InternalServerError,
            }
        })?;

        info!("User {} logged in, session {}", user.id, session.session_id);
        Ok(TokenResponse {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            token_type: BEARER.to_owned(),
            session_id: session.session_id,
        })
    }

    /// An inactive user with no pending activation link gets a new one.
    async fn reissue_activation(&self, user: &UserRecord) {
        if let Err(e) = self.sessions.sweep_orphans(user.id).await {
            warn!("Sweep before activation reissue failed for user {}: {e}", user.id);
            return;
        }
        match self.sessions.list_by_user(user.id).await {
            Ok(pending) if pending.is_empty() => match self.open_link_session(user).await {
                Ok(token) => {
                    self.notify(user, &token, EmailKind::RegisterEmail).await;
                }
                Err(e) => warn!("Could not reissue activation for user {}: {e}", user.id),
            },
            Ok(_) => {}
            Err(e) => warn!("Could not list sessions of user {}: {e}", user.id),
        }
    }

    pub async fn logout(&self, token: &str) -> Result<LogoutOutcome, LogoutError> {
        self.token_service
            .codec()
            .decode(token, TokenKind::Access)
            .map_err(|_| LogoutError::InvalidToken)?;

        let session = match self.sessions.find_by_token(token, TokenKind::Access).await {
            Ok(session) => session,
            Err(SessionStoreError::NotFound) => return Ok(LogoutOutcome::AlreadyLoggedOut),
            Err(_) => return Err(LogoutError::InternalServerError),
        };

        match self.sessions.delete_by_id(session.session_id).await {
            Ok(_) => {
                info!(
                    "User {} logged out of session {}",
                    session.user_id, session.session_id
                );
                Ok(LogoutOutcome::LoggedOut)
            }
            Err(SessionStoreError::NotFound) => Ok(LogoutOutcome::AlreadyLoggedOut),
            Err(_) => Err(LogoutError::InternalServerError),
        }
    }

    pub async fn check_auth(&self, token: &str) -> Result<VerifiedAccess, VerifyTokenError> {
        let claims = self
            .token_service
            .codec()
            .decode(token, TokenKind::Access)
            .map_err(|_| VerifyTokenError::InvalidToken)?;

        match self.users.find_user_by_identity(&claims.sub).await {
            Ok(_) => {}
            Err(UserDirectoryError::Unavailable(_)) => {
                return Err(VerifyTokenError::ServiceUnavailable)
            }
            Err(_) => return Err(VerifyTokenError::InvalidToken),
        }

        Ok(self
            .token_service
            .verify_and_refresh_access_token(token)
            .await?)
    }

    pub async fn request_password_recovery(&self, email: &str) -> Result<(), RecoveryError> {
        let email = Email::parse(email.to_owned()).map_err(|_| RecoveryError::InvalidEmail)?;
        let user = self.users.find_user_by_identity(email.as_ref()).await?;

        let token = self.open_link_session(&user).await.map_err(|e| match e {
            AccessError::StoreUnavailable(_) => RecoveryError::ServiceUnavailable,
            _ => RecoveryError::InternalServerError,
        })?;

        if !self.notify(&user, &token, EmailKind::RecoverPassword).await {
            return Err(RecoveryError::EmailNotSent);
        }
        Ok(())
    }

    pub async fn reset_password(
        &self,
        token: &str,
        password: Password,
    ) -> Result<UserRecord, RecoveryError> {
        let (session, user) = self.redeem_link(token).await?;
        let user = self.users.update_password(user.id, &password).await?;
        self.consume_link(session.session_id).await;
        info!("Password of user {} was reset", user.id);
        Ok(user)
    }

    pub async fn user_sessions(
        &self,
        token: &str,
    ) -> Result<AuthResponse<Vec<Session>>, SessionApiError> {
        let verified = self.check_auth(token).await?;
        let swept = self.sessions.sweep_orphans(verified.user_id).await?;
        if !swept.is_empty() {
            info!(
                "Swept {} orphaned sessions of user {}",
                swept.len(),
                verified.user_id
            );
        }
        let sessions = self.sessions.list_by_user(verified.user_id).await?;
        Ok(AuthResponse {
            data: sessions,
            token: verified.token,
        })
    }

    /// Delete one of the caller's sessions. Sessions of other users read as
    /// not found.
    pub async fn revoke_session(
        &self,
        token: &str,
        session_id: Uuid,
    ) -> Result<AuthResponse<Session>, SessionApiError> {
        let verified = self.check_auth(token).await?;
        let session = self.sessions.find_by_id(session_id).await?;
        if session.user_id != verified.user_id {
            return Err(SessionApiError::NotFound);
        }
        let deleted = self.sessions.delete_by_id(session_id).await?;
        info!(
            "User {} revoked session {}",
            verified.user_id, deleted.session_id
        );
        Ok(AuthResponse {
            data: deleted,
            token: verified.token,
        })
    }
}

enum LinkError {
    InvalidToken,
    Store(SessionStoreError),
    Users(UserDirectoryError),
}

impl From<LinkError> for ActivationError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::InvalidToken => ActivationError::InvalidToken,
            LinkError::Store(e) => e.into(),
            LinkError::Users(e) => e.into(),
        }
    }
}

impl From<LinkError> for RecoveryError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::InvalidToken => RecoveryError::InvalidToken,
            LinkError::Store(e) => e.into(),
            LinkError::Users(e) => e.into(),
        }
    }
}
