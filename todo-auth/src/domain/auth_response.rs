use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload plus the token the client must use for its next request.
#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct AuthResponse<T> {
    pub data: T,
    pub token: String,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub session_id: Uuid,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct CheckAuthResponse {
    pub token: String,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}
