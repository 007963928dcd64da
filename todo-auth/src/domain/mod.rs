pub mod as_redis_hash_args;
pub mod auth_response;
pub mod data_stores;
pub mod email;
pub mod email_client;
pub mod email_kind;
pub mod login_request;
pub mod logout_response;
pub mod minted_token;
pub mod password;
pub mod password_form;
pub mod session;
pub mod session_requests;
pub mod signup_request;
pub mod token_claims;
pub mod token_kind;
pub mod user;
pub mod verified_access;

pub use as_redis_hash_args::*;
pub use auth_response::*;
pub use data_stores::*;
pub use email::*;
pub use email_client::*;
pub use email_kind::*;
pub use login_request::*;
pub use logout_response::*;
pub use minted_token::*;
pub use password::*;
pub use password_form::*;
pub use session::*;
pub use session_requests::*;
pub use signup_request::*;
pub use token_claims::*;
pub use token_kind::*;
pub use user::*;
pub use verified_access::*;
