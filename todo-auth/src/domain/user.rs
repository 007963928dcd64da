use serde::{Deserialize, Serialize};

use super::{email::Email, password::Password};

/// User as reported by the user collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: Password,
}

impl NewUser {
    pub fn new(
        username: String,
        first_name: String,
        last_name: String,
        email: Email,
        password: Password,
    ) -> Self {
        NewUser {
            username,
            first_name,
            last_name,
            email,
            password,
        }
    }
}
