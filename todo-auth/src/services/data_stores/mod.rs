pub mod hashmap_session_store;
pub mod redis_service;
pub mod redis_session_store;

pub use hashmap_session_store::*;
pub use redis_service::*;
pub use redis_session_store::*;
