use std::env;

use base64::engine::general_purpose::{STANDARD as B64_STD, URL_SAFE_NO_PAD as B64_URL};
use base64::Engine;
use chrono::Duration;
use dotenvy::dotenv;
use thiserror::Error;

use super::consts::{env as keys, MAX_TTL_SECONDS};

#[derive(Clone)]
pub struct Config {
    issuer: String,
    access_secret: Vec<u8>,
    refresh_secret: Vec<u8>,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    session_ttl_seconds: i64,
    activation_ttl_seconds: i64,
    near_expiry_seconds: i64,
    redis_host: String,
    user_service_url: String,
    email_service_url: String,
    outbound_timeout_ms: u64,
    sweep_interval_seconds: u64,
    listen_address: String,
}

impl Config {
    pub fn jwt_issuer(&self) -> &str {
        &self.issuer
    }
    pub fn access_secret(&self) -> &[u8] {
        &self.access_secret
    }
    pub fn refresh_secret(&self) -> &[u8] {
        &self.refresh_secret
    }
    pub fn access_ttl(&self) -> Duration {
        Duration::seconds(self.access_ttl_seconds)
    }
    pub fn refresh_ttl(&self) -> Duration {
        Duration::seconds(self.refresh_ttl_seconds)
    }
    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(self.session_ttl_seconds)
    }
    pub fn activation_ttl(&self) -> Duration {
        Duration::seconds(self.activation_ttl_seconds)
    }
    pub fn near_expiry_threshold(&self) -> Duration {
        Duration::seconds(self.near_expiry_seconds)
    }
    pub fn redis_host(&self) -> &str {
        &self.redis_host
    }
    pub fn user_service_url(&self) -> &str {
        &self.user_service_url
    }
    pub fn email_service_url(&self) -> &str {
        &self.email_service_url
    }
    pub fn outbound_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.outbound_timeout_ms)
    }
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_seconds)
    }
    pub fn listen_address(&self) -> &str {
        &self.listen_address
    }

    pub fn default() -> Result<Self, ConfigError> {
        // Load .env in dev; no-op in prod if not present.
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `default()` feeds it the
    /// process environment; tests feed it a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let issuer = lookup(keys::JWT_ISSUER).unwrap_or_else(|| "auth-service".into());

        let access_secret = parse_secret(&lookup, keys::JWT_ACCESS_SECRET_B64)?;
        let refresh_secret = parse_secret(&lookup, keys::JWT_REFRESH_SECRET_B64)?;
        if access_secret == refresh_secret {
            return Err(ConfigError::Invalid(
                "access and refresh secrets must differ",
            ));
        }

        let access_ttl_seconds = parse_positive(&lookup, keys::ACCESS_TTL_SECONDS, 900)?;
        let refresh_ttl_seconds =
            parse_positive(&lookup, keys::REFRESH_TTL_SECONDS, 60 * 60 * 24 * 30)?;
        let session_ttl_seconds = parse_positive(&lookup, keys::SESSION_TTL_SECONDS, 86_400)?;
        let activation_ttl_seconds =
            parse_positive(&lookup, keys::ACTIVATION_TTL_SECONDS, 86_400)?;
        let near_expiry_seconds = parse_positive(&lookup, keys::NEAR_EXPIRY_SECONDS, 300)?;
        let outbound_timeout_ms = parse_positive(&lookup, keys::OUTBOUND_TIMEOUT_MS, 5_000)? as u64;
        let sweep_interval_seconds =
            parse_positive(&lookup, keys::SESSION_SWEEP_INTERVAL_SECONDS, 3_600)? as u64;

        let redis_host = lookup(keys::REDIS_HOST).unwrap_or_else(|| "127.0.0.1:6379".into());
        let user_service_url = lookup(keys::USER_SERVICE_URL)
            .unwrap_or_else(|| "http://127.0.0.1:8002".into())
            .trim_end_matches('/')
            .to_owned();
        let email_service_url = lookup(keys::EMAIL_SERVICE_URL)
            .unwrap_or_else(|| "http://127.0.0.1:8004".into())
            .trim_end_matches('/')
            .to_owned();
        let listen_address = lookup(keys::LISTEN_ADDRESS).unwrap_or_else(|| "0.0.0.0:8000".into());

        Ok(Self {
            issuer,
            access_secret,
            refresh_secret,
            access_ttl_seconds,
            refresh_ttl_seconds,
            session_ttl_seconds,
            activation_ttl_seconds,
            near_expiry_seconds,
            redis_host,
            user_service_url,
            email_service_url,
            outbound_timeout_ms,
            sweep_interval_seconds,
            listen_address,
        })
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing env var {0}")]
    Missing(&'static str),
    #[error("invalid env var {0}")]
    Invalid(&'static str),
    #[error("decode error in {0}")]
    Decode(&'static str),
    #[error("{0}")]
    WrongLen(&'static str),
}

fn parse_positive<F>(lookup: &F, key: &'static str, fallback: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(key) {
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| ConfigError::Invalid(key))?,
        None => fallback,
    };
    if value <= 0 || value > MAX_TTL_SECONDS {
        return Err(ConfigError::Invalid(key));
    }
    Ok(value)
}

fn parse_secret<F>(lookup: &F, key: &'static str) -> Result<Vec<u8>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or(ConfigError::Missing(key))?;
    let secret = decode_b64_any(raw.trim()).map_err(|_| ConfigError::Decode(key))?;

    // HS256 wants at least as many key bytes as the digest
    if secret.len() < 32 {
        return Err(ConfigError::WrongLen(
            "HS256 secret must be at least 32 bytes",
        ));
    }
    Ok(secret)
}

fn decode_b64_any(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    // Try URL-safe (no padding) first, then standard.
    B64_URL.decode(s).or_else(|_| B64_STD.decode(s))
}
