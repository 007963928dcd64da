use axum::http::{header::AUTHORIZATION, HeaderMap};

/// Pull the bearer credential out of an `Authorization` header.
///
/// The scheme is matched case-insensitively; an empty credential is treated
/// as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
