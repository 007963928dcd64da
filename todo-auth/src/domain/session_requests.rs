use serde::{Deserialize, Serialize};

use super::TokenKind;

#[derive(Deserialize, Serialize, Debug)]
pub struct SessionSearchQuery {
    pub token: String,
    #[serde(default)]
    pub token_type: TokenKind,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct TokenUpdateRequest {
    pub old_access_token: String,
    pub new_access_token: String,
}
