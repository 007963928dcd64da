use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use redis::Script;
use std::sync::Arc;
use uuid::Uuid;

use super::redis_service::{RedisService, RedisServiceErr};
use crate::{
    domain::{
        AsRedisHashArgs, NewSession, Session, SessionStore, SessionStoreError, SessionTtl,
        TokenKind,
    },
    utils::{SESSION_TOKEN_KEY_PREFIX, SESSION_USERS_KEY},
};

// KEYS: record, old token index, new token index
// ARGV: old token, new token, session id
// 1 swapped, 0 record gone, -1 stored token differs
const ROTATE_ACCESS_TOKEN: &str = r#"
local current = redis.call('HGET', KEYS[1], 'access_token')
if not current then
    return 0
end
if current ~= ARGV[1] then
    return -1
end
local ttl = redis.call('PTTL', KEYS[1])
if ttl == -2 then
    return 0
end
redis.call('HSET', KEYS[1], 'access_token', ARGV[2])
redis.call('DEL', KEYS[2])
if ttl > 0 then
    redis.call('SET', KEYS[3], ARGV[3], 'PX', ttl)
else
    redis.call('SET', KEYS[3], ARGV[3])
end
return 1
"#;

// KEYS: user index, users set. ARGV: user id
const DROP_EMPTY_USER_INDEX: &str = r#"
if redis.call('SCARD', KEYS[1]) == 0 then
    return redis.call('SREM', KEYS[2], ARGV[1])
end
return 0
"#;

fn unavailable(e: RedisServiceErr) -> SessionStoreError {
    SessionStoreError::Unavailable(e.to_string())
}

/// Reverse-index key for a token value. Tokens are hashed so that raw bearer
/// credentials never appear in key names.
pub fn token_index_key(kind: TokenKind, token: &str) -> String {
    let digest = blake3::hash(token.as_bytes());
    format!(
        "{SESSION_TOKEN_KEY_PREFIX}{}:{}",
        kind.as_str(),
        digest.to_hex()
    )
}

pub fn user_index_key(user_id: i64) -> String {
    format!("user:{user_id}:sessions")
}

/// Session store backed by Redis.
///
/// Each session is a hash under `session:{id}` expiring with the session,
/// plus one `session_token:{kind}:{digest}` key per token pointing back at
/// the id with the same expiry. `user:{id}:sessions` sets are not expired by
/// Redis; `sweep_orphans` reconciles them.
pub struct RedisSessionStore {
    redis_service: Arc<RedisService>,
    ttl: SessionTtl,
    rotate_script: Script,
    drop_user_script: Script,
}

impl RedisSessionStore {
    pub fn new(redis_service: Arc<RedisService>, ttl: SessionTtl) -> Self {
        Self {
            redis_service,
            ttl,
            rotate_script: Script::new(ROTATE_ACCESS_TOKEN),
            drop_user_script: Script::new(DROP_EMPTY_USER_INDEX),
        }
    }

    async fn load(&self, session_id: Uuid) -> Result<Option<Session>, SessionStoreError> {
        let fields = self
            .redis_service
            .get_hash_all(&Session::redis_key_for(session_id))
            .await
            .map_err(unavailable)?;

        if fields.is_empty() {
            return Ok(None);
        }

        match Session::from_redis_hash(fields) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Ignoring corrupt session record {session_id}: {e}");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, new_session: NewSession) -> Result<Session, SessionStoreError> {
        let new_session = new_session
            .normalized()
            .map_err(|e| SessionStoreError::Invalid(e.to_string()))?;
        let lifetime = self
            .ttl
            .lifetime_for(&new_session)
            .map_err(|e| SessionStoreError::Invalid(e.to_string()))?;
        let session = Session::open(new_session, Utc::now(), lifetime)
            .map_err(|e| SessionStoreError::Invalid(e.to_string()))?;

        let ttl_seconds = lifetime.num_seconds().max(1);
        let key = session.redis_key();
        let id = session.session_id.to_string();

        let mut pipe = redis::pipe();
        pipe.hset_multiple(&key, &session.as_redis_hash_args())
            .ignore()
            .expire(&key, ttl_seconds)
            .ignore()
            .set_ex(
                token_index_key(TokenKind::Access, &session.access_token),
                &id,
                ttl_seconds as u64,
            )
            .ignore();
        if let Some(refresh_token) = &session.refresh_token {
            pipe.set_ex(
                token_index_key(TokenKind::Refresh, refresh_token),
                &id,
                ttl_seconds as u64,
            )
            .ignore();
        }
        pipe.sadd(user_index_key(session.user_id), &id)
            .ignore()
            .sadd(SESSION_USERS_KEY, session.user_id)
            .ignore();

        self.redis_service
            .exec_atomic(pipe)
            .await
            .map_err(unavailable)?;

        debug!(
            "Created session {} for user {} expiring at {}",
            session.session_id, session.user_id, session.expires_at
        );
        Ok(session)
    }

    async fn find_by_id(&self, session_id: Uuid) -> Result<Session, SessionStoreError> {
        self.load(session_id)
            .await?
            .ok_or(SessionStoreError::NotFound)
    }

    async fn find_by_token(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<Session, SessionStoreError> {
        let indexed = self
            .redis_service
            .get(&token_index_key(kind, token))
            .await
            .map_err(unavailable)?;

        let Some(session_id) = indexed.and_then(|raw| Uuid::parse_str(&raw).ok()) else {
            return Err(SessionStoreError::NotFound);
        };

        // The index may lag a rotation that raced this lookup
        let session = self.find_by_id(session_id).await?;
        if session.token(kind) != Some(token) {
            return Err(SessionStoreError::NotFound);
        }
        Ok(session)
    }

    async fn update_access_token(
        &self,
        session_id: Uuid,
        old_token: &str,
        new_token: &str,
    ) -> Result<Session, SessionStoreError> {
        if new_token.trim().is_empty() {
            return Err(SessionStoreError::Invalid("new access token is empty".into()));
        }

        let keys = [
            Session::redis_key_for(session_id),
            token_index_key(TokenKind::Access, old_token),
            token_index_key(TokenKind::Access, new_token),
        ];
        let args = [
            old_token.to_owned(),
            new_token.to_owned(),
            session_id.to_string(),
        ];

        let status = self
            .redis_service
            .run_script(&self.rotate_script, &keys, &args)
            .await
            .map_err(unavailable)?;

        match status {
            1 => self.find_by_id(session_id).await,
            -1 => Err(SessionStoreError::StaleWrite),
            _ => Err(SessionStoreError::NotFound),
        }
    }

    async fn delete_by_id(&self, session_id: Uuid) -> Result<Session, SessionStoreError> {
        let session = self.find_by_id(session_id).await?;

        let mut pipe = redis::pipe();
        pipe.del(session.redis_key())
            .ignore()
            .del(token_index_key(TokenKind::Access, &session.access_token))
            .ignore();
        if let Some(refresh_token) = &session.refresh_token {
            pipe.del(token_index_key(TokenKind::Refresh, refresh_token))
                .ignore();
        }
        pipe.srem(user_index_key(session.user_id), session_id.to_string())
            .ignore();

        self.redis_service
            .exec_atomic(pipe)
            .await
            .map_err(unavailable)?;

        debug!("Deleted session {session_id} of user {}", session.user_id);
        Ok(session)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Session>, SessionStoreError> {
        let members = self
            .redis_service
            .set_members(&user_index_key(user_id))
            .await
            .map_err(unavailable)?;

        let mut sessions = Vec::with_capacity(members.len());
        for member in members {
            let Ok(session_id) = Uuid::parse_str(&member) else {
                continue;
            };
            if let Some(session) = self.load(session_id).await? {
                sessions.push(session);
            }
        }
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }

    async fn sweep_orphans(&self, user_id: i64) -> Result<Vec<Uuid>, SessionStoreError> {
        let index_key = user_index_key(user_id);
        let members = self
            .redis_service
            .set_members(&index_key)
            .await
            .map_err(unavailable)?;

        let mut removed = Vec::new();
        for member in members {
            let Ok(session_id) = Uuid::parse_str(&member) else {
                warn!("Dropping malformed entry {member:?} from {index_key}");
                self.redis_service
                    .remove_member(&index_key, &member)
                    .await
                    .map_err(unavailable)?;
                continue;
            };

            let present = self
                .redis_service
                .exists(&Session::redis_key_for(session_id))
                .await
                .map_err(unavailable)?;
            if present {
                continue;
            }

            // SREM is a no-op if a concurrent sweep got there first
            if self
                .redis_service
                .remove_member(&index_key, &member)
                .await
                .map_err(unavailable)?
            {
                removed.push(session_id);
            }
        }

        self.redis_service
            .run_script(
                &self.drop_user_script,
                &[index_key, SESSION_USERS_KEY.to_owned()],
                &[user_id.to_string()],
            )
            .await
            .map_err(unavailable)?;

        Ok(removed)
    }

    async fn indexed_users(&self) -> Result<Vec<i64>, SessionStoreError> {
        let members = self
            .redis_service
            .set_members(SESSION_USERS_KEY)
            .await
            .map_err(unavailable)?;

        let mut users: Vec<i64> = members
            .iter()
            .filter_map(|raw| raw.parse::<i64>().ok())
            .collect();
        users.sort_unstable();
        Ok(users)
    }
}
