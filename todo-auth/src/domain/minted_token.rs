use super::TokenClaims;

#[derive(Debug, Clone)]
pub struct MintedToken {
    pub token: String,
    pub claims: TokenClaims,
}
