pub mod session_store;
pub mod session_store_err;
pub mod user_directory;
pub mod user_directory_err;

pub use session_store::SessionStore;
pub use session_store_err::SessionStoreError;
pub use user_directory::UserDirectory;
pub use user_directory_err::UserDirectoryError;
