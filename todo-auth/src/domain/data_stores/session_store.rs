use uuid::Uuid;

use super::SessionStoreError;
use crate::domain::{NewSession, Session, TokenKind};

/// Keyed session storage with lookups by id, by token value and by owning
/// user, plus storage-level expiry of records.
///
/// Contract shared by every implementation:
/// - a rotated-out access token never resolves to its session again;
/// - `update_access_token` is a compare-and-swap on the stored access token
///   and leaves the record's lifetime untouched;
/// - records with an incomplete field set read as `NotFound`;
/// - the per-user index may briefly point at records that storage already
///   expired; `sweep_orphans` reconciles it and is safe to run concurrently
///   with `create`.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, new_session: NewSession) -> Result<Session, SessionStoreError>;

    async fn find_by_id(&self, session_id: Uuid) -> Result<Session, SessionStoreError>;

    async fn find_by_token(&self, token: &str, kind: TokenKind)
        -> Result<Session, SessionStoreError>;

    /// Swap the access token of `session_id` from `old_token` to `new_token`.
    /// Fails with `StaleWrite` when the stored token is no longer `old_token`.
    async fn update_access_token(
        &self,
        session_id: Uuid,
        old_token: &str,
        new_token: &str,
    ) -> Result<Session, SessionStoreError>;

    async fn delete_by_id(&self, session_id: Uuid) -> Result<Session, SessionStoreError>;

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Session>, SessionStoreError>;

    /// Drop index entries of `user_id` whose record is gone. Returns the ids
    /// removed.
    async fn sweep_orphans(&self, user_id: i64) -> Result<Vec<Uuid>, SessionStoreError>;

    /// Users that currently own a session index.
    async fn indexed_users(&self) -> Result<Vec<i64>, SessionStoreError>;
}
