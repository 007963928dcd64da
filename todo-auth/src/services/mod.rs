pub mod auth;
pub mod data_stores;
pub mod hashmap_user_directory;
pub mod http_email_client;
pub mod http_user_directory;
pub mod mock_email_client;
pub mod session_sweeper;
pub mod token_codec;
pub mod token_service;

pub use auth::*;
pub use data_stores::*;
pub use hashmap_user_directory::*;
pub use http_email_client::*;
pub use http_user_directory::*;
pub use mock_email_client::*;
pub use session_sweeper::*;
pub use token_codec::*;
pub use token_service::*;
