use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct LogoutResponse {
    pub message: String,
}

/// Outcome of a logout. Both variants are success from the client's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    LoggedOut,
    AlreadyLoggedOut,
}

impl LogoutOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            LogoutOutcome::LoggedOut => "Logged out successfully",
            LogoutOutcome::AlreadyLoggedOut => "Already logged out",
        }
    }
}
