use super::UserDirectoryError;
use crate::domain::{NewUser, Password, UserRecord};

/// Access to the user collaborator. Password hashing and persistence live
/// behind this seam.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look a user up by email or username.
    async fn find_user_by_identity(&self, identifier: &str)
        -> Result<UserRecord, UserDirectoryError>;

    async fn authenticate_user(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<UserRecord, UserDirectoryError>;

    /// Create an inactive account.
    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord, UserDirectoryError>;

    async fn set_active(&self, user_id: i64, active: bool)
        -> Result<UserRecord, UserDirectoryError>;

    async fn update_password(
        &self,
        user_id: i64,
        password: &Password,
    ) -> Result<UserRecord, UserDirectoryError>;
}
