pub mod env {
    pub const JWT_ISSUER: &str = "JWT_ISSUER";
    pub const JWT_ACCESS_SECRET_B64: &str = "JWT_ACCESS_SECRET_B64";
    pub const JWT_REFRESH_SECRET_B64: &str = "JWT_REFRESH_SECRET_B64";
    pub const ACCESS_TTL_SECONDS: &str = "ACCESS_TTL_SECONDS";
    pub const REFRESH_TTL_SECONDS: &str = "REFRESH_TTL_SECONDS";
    pub const SESSION_TTL_SECONDS: &str = "SESSION_TTL_SECONDS";
    pub const ACTIVATION_TTL_SECONDS: &str = "ACTIVATION_TTL_SECONDS";
    pub const NEAR_EXPIRY_SECONDS: &str = "NEAR_EXPIRY_SECONDS";
    pub const REDIS_HOST: &str = "REDIS_HOST";
    pub const USER_SERVICE_URL: &str = "USER_SERVICE_URL";
    pub const EMAIL_SERVICE_URL: &str = "EMAIL_SERVICE_URL";
    pub const OUTBOUND_TIMEOUT_MS: &str = "OUTBOUND_TIMEOUT_MS";
    pub const SESSION_SWEEP_INTERVAL_SECONDS: &str = "SESSION_SWEEP_INTERVAL_SECONDS";
    pub const LISTEN_ADDRESS: &str = "LISTEN_ADDRESS";
}

// JOSE `typ` header values keeping access and refresh tokens apart
pub const ACCESS_TOKEN_TYP: &str = "at+jwt";
pub const REFRESH_TOKEN_TYP: &str = "rt+jwt";

pub const SESSION_KEY_PREFIX: &str = "session:";
pub const SESSION_TOKEN_KEY_PREFIX: &str = "session_token:";
pub const SESSION_USERS_KEY: &str = "session_users";

// Upper bound on any configured or requested lifetime (ten years)
pub const MAX_TTL_SECONDS: i64 = 60 * 60 * 24 * 365 * 10;

// Request-level bound applied by the router
pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";
