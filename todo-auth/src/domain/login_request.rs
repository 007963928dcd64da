use serde::{Deserialize, Serialize};

/// Login form. `identifier` is either the username or the email address.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequestBody {
    pub identifier: String,
    pub password: String,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub remember_me: bool,
}
