#[path = "../common/mod.rs"]
mod common;

mod check_auth;
mod helpers;
mod login;
mod logout;
mod recovery;
mod sessions;
mod signup;
