use serde::{Deserialize, Serialize};

use crate::utils::{ACCESS_TOKEN_TYP, REFRESH_TOKEN_TYP};

/// Which of the two token families a value belongs to. The two are signed
/// with different secrets and never accepted in place of one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenKind {
    #[default]
    #[serde(rename = "access_token")]
    Access,
    #[serde(rename = "refresh_token")]
    Refresh,
}

impl TokenKind {
    pub fn jwt_typ(&self) -> &'static str {
        match self {
            TokenKind::Access => ACCESS_TOKEN_TYP,
            TokenKind::Refresh => REFRESH_TOKEN_TYP,
        }
    }

    /// Short label used in storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    /// Name of the session field holding a token of this kind.
    pub fn session_field(&self) -> &'static str {
        match self {
            TokenKind::Access => "access_token",
            TokenKind::Refresh => "refresh_token",
        }
    }
}
