//! Access-token verification with transparent rotation.
//!
//! A presented access token goes through three checks:
//! 1. signature, kind and issuer (`TokenCodec::decode`, expiry ignored);
//! 2. a live session whose current access token is exactly this value;
//! 3. freshness against the near-expiry threshold.
//!
//! Fresh tokens come back unchanged. Near-expiry and expired tokens are
//! replaced by a newly minted access token, written into the session with a
//! compare-and-swap on the old value. The caller must adopt whatever token is
//! returned, since the presented one may no longer resolve.
//!
//! When two requests rotate the same token concurrently only one write lands.
//! The loser discards its own minted token, re-reads the session once and
//! returns the token the winner stored.
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::token_codec::{TokenCodec, TokenError};
use crate::domain::{
    MintedToken, Session, SessionStore, SessionStoreError, TokenClaims, TokenKind,
    VerifiedAccess,
};
use crate::utils::Config;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token is not backed by a live session")]
    NoSession,
    #[error("refresh token was rejected")]
    RefreshRejected,
    #[error("session store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("failed to mint token: {0}")]
    Minting(String),
}

impl From<SessionStoreError> for AccessError {
    fn from(e: SessionStoreError) -> Self {
        match e {
            SessionStoreError::Unavailable(reason) => AccessError::StoreUnavailable(reason),
            SessionStoreError::NotFound
            | SessionStoreError::StaleWrite
            | SessionStoreError::Invalid(_) => AccessError::NoSession,
        }
    }
}

impl From<TokenError> for AccessError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::BadSignature => AccessError::BadSignature,
            other => AccessError::Minting(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    NearExpiry,
    Expired,
}

impl Freshness {
    /// `Expired` once `exp` is reached, `NearExpiry` within `threshold` of it
    /// (inclusive), `Fresh` otherwise.
    pub fn classify(expires_at: DateTime<Utc>, now: DateTime<Utc>, threshold: Duration) -> Self {
        let time_left = expires_at - now;
        if time_left <= Duration::zero() {
            Freshness::Expired
        } else if time_left <= threshold {
            Freshness::NearExpiry
        } else {
            Freshness::Fresh
        }
    }
}

#[derive(Clone)]
pub struct TokenService {
    codec: Arc<TokenCodec>,
    sessions: Arc<dyn SessionStore>,
    access_ttl: Duration,
    refresh_ttl: Duration,
    near_expiry: Duration,
}

impl TokenService {
    pub fn new(
        codec: Arc<TokenCodec>,
        sessions: Arc<dyn SessionStore>,
        access_ttl: Duration,
        refresh_ttl: Duration,
        near_expiry: Duration,
    ) -> Self {
        Self {
            codec,
            sessions,
            access_ttl,
            refresh_ttl,
            near_expiry,
        }
    }

    pub fn from_config(
        config: &Config,
        codec: Arc<TokenCodec>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self::new(
            codec,
            sessions,
            config.access_ttl(),
            config.refresh_ttl(),
            config.near_expiry_threshold(),
        )
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn mint_access(&self, subject: &str) -> Result<MintedToken, TokenError> {
        self.codec.mint(subject, TokenKind::Access, self.access_ttl)
    }

    pub fn mint_refresh(&self, subject: &str) -> Result<MintedToken, TokenError> {
        self.codec.mint(subject, TokenKind::Refresh, self.refresh_ttl)
    }

    pub async fn verify_and_refresh_access_token(
        &self,
        token: &str,
    ) -> Result<VerifiedAccess, AccessError> {
        let claims = self
            .codec
            .decode(token, TokenKind::Access)
            .map_err(|_| AccessError::BadSignature)?;

        let session = self
            .sessions
            .find_by_token(token, TokenKind::Access)
            .await?;

        match Freshness::classify(claims.expires_at(), Utc::now(), self.near_expiry) {
            Freshness::Fresh => Ok(VerifiedAccess {
                token: token.to_owned(),
                claims,
                session_id: session.session_id,
                user_id: session.user_id,
                rotated: false,
            }),
            stale => {
                debug!(
                    "Access token of session {} is {:?}, rotating",
                    session.session_id, stale
                );
                self.refresh_access_token(&session, &claims).await
            }
        }
    }

    /// Mint a replacement for the session's current access token and record
    /// it. `claims` are the decoded claims of that current token.
    pub async fn refresh_access_token(
        &self,
        session: &Session,
        claims: &TokenClaims,
    ) -> Result<VerifiedAccess, AccessError> {
        if let Some(refresh_token) = &session.refresh_token {
            let refresh_claims = self
                .codec
                .decode(refresh_token, TokenKind::Refresh)
                .map_err(|_| AccessError::RefreshRejected)?;
            if refresh_claims.sub != claims.sub {
                warn!(
                    "Refresh token subject mismatch on session {}",
                    session.session_id
                );
                return Err(AccessError::RefreshRejected);
            }
        }

        let minted = self.mint_access(&claims.sub)?;

        match self
            .sessions
            .update_access_token(session.session_id, &session.access_token, &minted.token)
            .await
        {
            Ok(_) => {
                info!("Rotated access token of session {}", session.session_id);
                Ok(VerifiedAccess {
                    token: minted.token,
                    claims: minted.claims,
                    session_id: session.session_id,
                    user_id: session.user_id,
                    rotated: true,
                })
            }
            Err(SessionStoreError::StaleWrite) => self.adopt_current(session.session_id).await,
            Err(e) => Err(e.into()),
        }
    }

    /// Lost a rotation race: hand back whatever the winner stored.
    async fn adopt_current(&self, session_id: Uuid) -> Result<VerifiedAccess, AccessError> {
        debug!("Concurrent rotation on session {session_id}, adopting stored token");
        let session = self.sessions.find_by_id(session_id).await?;
        let claims = self
            .codec
            .decode(&session.access_token, TokenKind::Access)
            .map_err(|_| AccessError::NoSession)?;

        Ok(VerifiedAccess {
            token: session.access_token,
            claims,
            session_id,
            user_id: session.user_id,
            rotated: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        let now = Utc::now();
        let threshold = Duration::seconds(300);

        assert_eq!(Freshness::classify(now, now, threshold), Freshness::Expired);
        assert_eq!(
            Freshness::classify(now - Duration::seconds(1), now, threshold),
            Freshness::Expired
        );
        assert_eq!(
            Freshness::classify(now + Duration::seconds(300), now, threshold),
            Freshness::NearExpiry
        );
        assert_eq!(
            Freshness::classify(now + Duration::seconds(301), now, threshold),
            Freshness::Fresh
        );
    }

    #[test]
    fn store_errors_never_read_as_bad_tokens() {
        assert_eq!(
            AccessError::from(SessionStoreError::Unavailable("down".into())),
            AccessError::StoreUnavailable("down".into())
        );
        assert_eq!(
            AccessError::from(SessionStoreError::NotFound),
            AccessError::NoSession
        );
    }
}
