use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{NewSession, Session, SessionStore, SessionStoreError, SessionTtl, TokenKind};

#[derive(Default)]
struct Sessions {
    records: HashMap<Uuid, Session>,
    by_token: HashMap<(TokenKind, String), Uuid>,
    by_user: HashMap<i64, HashSet<Uuid>>,
}

impl Sessions {
    /// Drop a record and its token keys. The user index is left alone, the
    /// same way storage-level expiry would leave it.
    fn forget(&mut self, session_id: Uuid) -> Option<Session> {
        let session = self.records.remove(&session_id)?;
        self.by_token
            .remove(&(TokenKind::Access, session.access_token.clone()));
        if let Some(refresh_token) = &session.refresh_token {
            self.by_token
                .remove(&(TokenKind::Refresh, refresh_token.clone()));
        }
        Some(session)
    }

    fn live(&self, session_id: &Uuid) -> Option<&Session> {
        self.records
            .get(session_id)
            .filter(|s| s.is_live(Utc::now()))
    }
}

/// In-memory session store with the same contract as the Redis one. Records
/// past `expires_at` read as absent and are reaped lazily.
pub struct HashmapSessionStore {
    sessions: RwLock<Sessions>,
    ttl: SessionTtl,
}

impl HashmapSessionStore {
    pub fn new(ttl: SessionTtl) -> Self {
        Self {
            sessions: RwLock::new(Sessions::default()),
            ttl,
        }
    }

    /// Remove a record as if its storage TTL had fired.
    pub async fn evict(&self, session_id: Uuid) -> bool {
        self.sessions.write().await.forget(session_id).is_some()
    }
}

#[async_trait]
impl SessionStore for HashmapSessionStore {
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

        let mut sessions = self.sessions.write().await;
        sessions.by_token.insert(
            (TokenKind::Access, session.access_token.clone()),
            session.session_id,
        );
        if let Some(refresh_token) = &session.refresh_token {
            sessions
                .by_token
                .insert((TokenKind::Refresh, refresh_token.clone()), session.session_id);
        }
        sessions
            .by_user
            .entry(session.user_id)
            .or_default()
            .insert(session.session_id);
        sessions.records.insert(session.session_id, session.clone());

        Ok(session)
    }

    async fn find_by_id(&self, session_id: Uuid) -> Result<Session, SessionStoreError> {
        self.sessions
            .read()
            .await
            .live(&session_id)
            .cloned()
            .ok_or(SessionStoreError::NotFound)
    }

    async fn find_by_token(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<Session, SessionStoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .by_token
            .get(&(kind, token.to_owned()))
            .and_then(|id| sessions.live(id))
            .filter(|s| s.token(kind) == Some(token))
            .cloned()
            .ok_or(SessionStoreError::NotFound)
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

        let mut sessions = self.sessions.write().await;
        if sessions.live(&session_id).is_none() {
            sessions.forget(session_id);
            return Err(SessionStoreError::NotFound);
        }

        let session = sessions
            .records
            .get_mut(&session_id)
            .ok_or(SessionStoreError::NotFound)?;
        if session.access_token != old_token {
            return Err(SessionStoreError::StaleWrite);
        }
        session.access_token = new_token.to_owned();
        let updated = session.clone();

        sessions
            .by_token
            .remove(&(TokenKind::Access, old_token.to_owned()));
        sessions
            .by_token
            .insert((TokenKind::Access, new_token.to_owned()), session_id);

        Ok(updated)
    }

    async fn delete_by_id(&self, session_id: Uuid) -> Result<Session, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let live = sessions.live(&session_id).is_some();
        let session = sessions
            .forget(session_id)
            .ok_or(SessionStoreError::NotFound)?;

        if let Some(ids) = sessions.by_user.get_mut(&session.user_id) {
            ids.remove(&session_id);
        }

        if !live {
            return Err(SessionStoreError::NotFound);
        }
        Ok(session)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Session>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        let mut listed: Vec<Session> = sessions
            .by_user
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter_map(|id| sessions.live(id).cloned())
            .collect();
        listed.sort_by_key(|s| s.created_at);
        Ok(listed)
    }

    async fn sweep_orphans(&self, user_id: i64) -> Result<Vec<Uuid>, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let Some(ids) = sessions.by_user.get(&user_id).cloned() else {
            return Ok(Vec::new());
        };

        let mut removed = Vec::new();
        for id in ids {
            if sessions.live(&id).is_some() {
                continue;
            }
            sessions.forget(id);
            removed.push(id);
        }

        if let Some(index) = sessions.by_user.get_mut(&user_id) {
            for id in &removed {
                index.remove(id);
            }
            if index.is_empty() {
                sessions.by_user.remove(&user_id);
            }
        }

        Ok(removed)
    }

    async fn indexed_users(&self) -> Result<Vec<i64>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        let mut users: Vec<i64> = sessions.by_user.keys().copied().collect();
        users.sort_unstable();
        Ok(users)
    }
}
