use once_cell::sync::Lazy;
use regex::Regex;

static UPPER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("upper regex compiles"));
static SPECIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("special regex compiles"));

// counted in chars, not bytes
const MAX_PASSWORD_LEN: usize = 128;

/// True if pw is 8..=128 chars, has at least one uppercase and one special char
pub fn is_valid_password(pw: &str) -> bool {
    (8..=MAX_PASSWORD_LEN).contains(&pw.chars().count()) && UPPER_RE.is_match(pw) && SPECIAL_RE.is_match(pw)
}
