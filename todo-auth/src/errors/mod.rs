mod activation;
mod login;
mod logout;
mod recovery;
mod session_api;
mod signup;
mod verify_token;

pub use activation::*;
pub use login::*;
pub use logout::*;
pub use recovery::*;
pub use session_api::*;
pub use signup::*;
pub use verify_token::*;
