mod email;
mod password;
mod username;

pub use email::is_valid_email;
pub use password::is_valid_password;
pub use username::is_valid_username;
