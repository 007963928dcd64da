use uuid::Uuid;

use super::TokenClaims;

/// A bearer token that passed the refresh protocol. `token` is the value the
/// caller must use from now on; it differs from the presented one when
/// `rotated` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedAccess {
    pub token: String,
    pub claims: TokenClaims,
    pub session_id: Uuid,
    pub user_id: i64,
    pub rotated: bool,
}
