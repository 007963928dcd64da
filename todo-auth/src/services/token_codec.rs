use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{MintedToken, TokenClaims, TokenKind};
use crate::utils::Config;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    /// Tampered, malformed, signed with the other kind's secret or issued by
    /// someone else. Callers must re-authenticate.
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token subject must not be empty")]
    EmptySubject,
    #[error("token ttl must be positive")]
    InvalidTtl,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Mints and decodes the signed, time-bound tokens carrying a user identity.
///
/// Decoding verifies signature, kind and issuer only. Expiry is left to the
/// refresh protocol, so an expired but authentic token still yields its
/// subject.
pub struct TokenCodec {
    issuer: String,
    access: SigningKeys,
    refresh: SigningKeys,
}

impl TokenCodec {
    pub fn new(issuer: impl Into<String>, access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            issuer: issuer.into(),
            access: SigningKeys::from_secret(access_secret),
            refresh: SigningKeys::from_secret(refresh_secret),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_issuer(),
            config.access_secret(),
            config.refresh_secret(),
        )
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    pub fn mint(
        &self,
        subject: &str,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<MintedToken, TokenError> {
        if subject.trim().is_empty() {
            return Err(TokenError::EmptySubject);
        }
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidTtl);
        }

        let now = Utc::now();
        let claims = TokenClaims {
            iss: self.issuer.clone(),
            sub: subject.to_owned(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some(kind.jwt_typ().to_owned());

        let token = encode(&header, &claims, &self.keys(kind).encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(MintedToken { token, claims })
    }

    pub fn decode(&self, raw: &str, kind: TokenKind) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = decode::<TokenClaims>(raw, &self.keys(kind).decoding, &validation)
            .map_err(|_| TokenError::BadSignature)?;

        if data.header.typ.as_deref() != Some(kind.jwt_typ()) {
            return Err(TokenError::BadSignature);
        }
        if data.claims.sub.trim().is_empty() {
            return Err(TokenError::BadSignature);
        }

        Ok(data.claims)
    }
}
