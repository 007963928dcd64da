use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{NewUser, Password, UserDirectory, UserDirectoryError, UserRecord};

struct StoredUser {
    record: UserRecord,
    password_hash: String,
}

impl StoredUser {
    fn matches(&self, identifier: &str) -> bool {
        self.record.username == identifier
            || self.record.email == identifier.trim().to_lowercase()
    }
}

#[derive(Default)]
struct Users {
    by_id: HashMap<i64, StoredUser>,
    last_id: i64,
}

/// In-process user directory used by tests and local runs.
#[derive(Default)]
pub struct HashmapUserDirectory {
    users: RwLock<Users>,
}

impl HashmapUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.by_id.len()
    }

    async fn hash_password(password: &str) -> Result<String, UserDirectoryError> {
        let password_clone = password.to_owned();
        tokio::task::spawn_blocking(move || {
            let argon2 = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None)
                    .map_err(|e| UserDirectoryError::Unexpected(e.to_string()))?,
            );
            let salt = SaltString::generate(&mut OsRng);
            let password_hash = argon2
                .hash_password(password_clone.as_bytes(), &salt)
                .map_err(|e| UserDirectoryError::Unexpected(e.to_string()))?
                .to_string();
            Ok(password_hash)
        })
        .await
        .map_err(|e| UserDirectoryError::Unexpected(e.to_string()))?
    }

    async fn verify_password(password: &str, hash: &str) -> Result<bool, UserDirectoryError> {
        let password_clone = password.to_owned();
        let hash_clone = hash.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hash_clone)
                .map_err(|e| UserDirectoryError::Unexpected(e.to_string()))?;
            Ok(Argon2::default()
                .verify_password(password_clone.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
        .map_err(|e| UserDirectoryError::Unexpected(e.to_string()))?
    }
}

#[async_trait]
impl UserDirectory for HashmapUserDirectory {
    async fn find_user_by_identity(
        &self,
        identifier: &str,
    ) -> Result<UserRecord, UserDirectoryError> {
        self.users
            .read()
            .await
            .by_id
            .values()
            .find(|u| u.matches(identifier))
            .map(|u| u.record.clone())
            .ok_or(UserDirectoryError::NotFound)
    }

    async fn authenticate_user(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<UserRecord, UserDirectoryError> {
        let (record, password_hash) = {
            let users = self.users.read().await;
            let user = users
                .by_id
                .values()
                .find(|u| u.matches(identifier))
                .ok_or(UserDirectoryError::NotFound)?;
            (user.record.clone(), user.password_hash.clone())
        };

        if Self::verify_password(password, &password_hash).await? {
            Ok(record)
        } else {
            Err(UserDirectoryError::Unauthorized)
        }
    }

    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord, UserDirectoryError> {
        let password_hash = Self::hash_password(new_user.password.as_ref()).await?;

        let mut users = self.users.write().await;
        let taken = users.by_id.values().any(|u| {
            u.record.username == new_user.username || u.record.email == new_user.email.as_ref()
        });
        if taken {
            return Err(UserDirectoryError::AlreadyExists);
        }

        users.last_id += 1;
        let record = UserRecord {
            id: users.last_id,
            username: new_user.username,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email.as_ref().to_owned(),
            is_active: false,
        };
        users.by_id.insert(
            record.id,
            StoredUser {
                record: record.clone(),
                password_hash,
            },
        );
        Ok(record)
    }

    async fn set_active(
        &self,
        user_id: i64,
        active: bool,
    ) -> Result<UserRecord, UserDirectoryError> {
        let mut users = self.users.write().await;
        let user = users
            .by_id
            .get_mut(&user_id)
            .ok_or(UserDirectoryError::NotFound)?;
        user.record.is_active = active;
        Ok(user.record.clone())
    }

    async fn update_password(
        &self,
        user_id: i64,
        password: &Password,
    ) -> Result<UserRecord, UserDirectoryError> {
        let password_hash = Self::hash_password(password.as_ref()).await?;
        let mut users = self.users.write().await;
        let user = users
            .by_id
            .get_mut(&user_id)
            .ok_or(UserDirectoryError::NotFound)?;
        user.password_hash = password_hash;
        Ok(user.record.clone())
    }
}
