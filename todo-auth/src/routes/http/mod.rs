pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod recovery;
pub(crate) mod sessions;
pub(crate) mod signup;
pub(crate) mod verify_token;

pub use login::*;
pub use logout::*;
pub use recovery::*;
pub use sessions::*;
pub use signup::*;
pub use verify_token::*;
