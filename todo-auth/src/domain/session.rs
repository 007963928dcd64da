use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{AsRedisHashArgs, TokenKind};
use crate::utils::{Config, MAX_TTL_SECONDS, SESSION_KEY_PREFIX};

const UNKNOWN: &str = "unknown";

fn unknown() -> String {
    UNKNOWN.to_owned()
}

/// One authenticated client connection. At most one access token is current
/// per session; the refresh token, when present, is fixed for its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: i64,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub device: String,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Session creation payload, as accepted by `POST /session/crud`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
    pub user_id: i64,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "unknown")]
    pub device: String,
    #[serde(default = "unknown")]
    pub ip_address: String,
    /// Explicit lifetime in seconds; overrides the configured defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

impl NewSession {
    pub fn new(user_id: i64, access_token: impl Into<String>) -> Self {
        Self {
            user_id,
            access_token: access_token.into(),
            refresh_token: None,
            device: unknown(),
            ip_address: unknown(),
            expires_in: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: Option<String>) -> Self {
        self.refresh_token = refresh_token;
        self
    }

    pub fn with_client(mut self, device: Option<String>, ip_address: Option<String>) -> Self {
        if let Some(device) = device {
            self.device = device;
        }
        if let Some(ip_address) = ip_address {
            self.ip_address = ip_address;
        }
        self
    }

    pub fn expiring_in(mut self, lifetime: Duration) -> Self {
        self.expires_in = Some(lifetime.num_seconds());
        self
    }

    /// Blank optional fields collapse to their defaults; a blank access token
    /// is rejected.
    pub fn normalized(mut self) -> Result<Self, SessionRecordError> {
        if self.access_token.trim().is_empty() {
            return Err(SessionRecordError::InvalidField("access_token"));
        }
        if self.refresh_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.refresh_token = None;
        }
        if self.device.trim().is_empty() {
            self.device = unknown();
        }
        if self.ip_address.trim().is_empty() {
            self.ip_address = unknown();
        }
        if self
            .expires_in
            .is_some_and(|secs| secs <= 0 || secs > MAX_TTL_SECONDS)
        {
            return Err(SessionRecordError::InvalidField("expires_in"));
        }
        Ok(self)
    }
}

/// Lifetime rules for new sessions. Rotation never changes a session's
/// lifetime once it is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionTtl {
    pub default_ttl: Duration,
    pub remember_me_ttl: Duration,
}

impl SessionTtl {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_ttl: config.session_ttl(),
            remember_me_ttl: config.refresh_ttl(),
        }
    }

    pub fn lifetime_for(&self, new_session: &NewSession) -> Result<Duration, SessionRecordError> {
        match (new_session.expires_in, &new_session.refresh_token) {
            (Some(secs), _) => {
                Duration::try_seconds(secs).ok_or(SessionRecordError::InvalidField("expires_in"))
            }
            (None, Some(_)) => Ok(self.remember_me_ttl),
            (None, None) => Ok(self.default_ttl),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SessionRecordError {
    #[error("session record is missing field {0}")]
    MissingField(&'static str),
    #[error("session record has invalid field {0}")]
    InvalidField(&'static str),
}

impl Session {
    pub fn open(
        new_session: NewSession,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, SessionRecordError> {
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or(SessionRecordError::InvalidField("expires_in"))?;
        Ok(Self {
            session_id: Uuid::new_v4(),
            user_id: new_session.user_id,
            access_token: new_session.access_token,
            refresh_token: new_session.refresh_token,
            device: new_session.device,
            ip_address: new_session.ip_address,
            created_at: now,
            expires_at,
        })
    }

    pub fn token(&self, kind: TokenKind) -> Option<&str> {
        match kind {
            TokenKind::Access => Some(self.access_token.as_str()),
            TokenKind::Refresh => self.refresh_token.as_deref(),
        }
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn lifetime(&self) -> Duration {
        self.expires_at - self.created_at
    }

    pub fn redis_key(&self) -> String {
        Self::redis_key_for(self.session_id)
    }

    pub fn redis_key_for(session_id: Uuid) -> String {
        format!("{SESSION_KEY_PREFIX}{session_id}")
    }

    /// Rebuild a session from its stored hash. Partial records are rejected
    /// rather than patched up.
    pub fn from_redis_hash(fields: Vec<(String, String)>) -> Result<Self, SessionRecordError> {
        let mut map: HashMap<String, String> = fields.into_iter().collect();

        let mut take = |name: &'static str| -> Result<String, SessionRecordError> {
            map.remove(name).ok_or(SessionRecordError::MissingField(name))
        };

        let session_id = Uuid::parse_str(&take("session_id")?)
            .map_err(|_| SessionRecordError::InvalidField("session_id"))?;
        let user_id = take("user_id")?
            .parse::<i64>()
            .map_err(|_| SessionRecordError::InvalidField("user_id"))?;
        let access_token = take("access_token")?;
        let device = take("device")?;
        let ip_address = take("ip_address")?;
        let created_at = parse_timestamp(&take("created_at")?, "created_at")?;
        let expires_at = parse_timestamp(&take("expires_at")?, "expires_at")?;
        let refresh_token = take("refresh_token").ok().filter(|t| !t.is_empty());

        Ok(Self {
            session_id,
            user_id,
            access_token,
            refresh_token,
            device,
            ip_address,
            created_at,
            expires_at,
        })
    }
}

fn parse_timestamp(raw: &str, field: &'static str) -> Result<DateTime<Utc>, SessionRecordError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| SessionRecordError::InvalidField(field))
}

impl AsRedisHashArgs for Session {
    fn as_redis_hash_args(&self) -> Vec<(String, String)> {
        let mut args = vec![
            ("session_id".to_owned(), self.session_id.to_string()),
            ("user_id".to_owned(), self.user_id.to_string()),
            ("access_token".to_owned(), self.access_token.clone()),
            ("device".to_owned(), self.device.clone()),
            ("ip_address".to_owned(), self.ip_address.clone()),
            ("created_at".to_owned(), self.created_at.to_rfc3339()),
            ("expires_at".to_owned(), self.expires_at.to_rfc3339()),
        ];
        if let Some(refresh_token) = &self.refresh_token {
            args.push(("refresh_token".to_owned(), refresh_token.clone()));
        }
        args
    }
}
