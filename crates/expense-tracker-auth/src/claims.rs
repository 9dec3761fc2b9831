use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in an access token.
///
/// `sub` holds the user id as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiration (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    pub fn new(user_id: i64, email: &str, issued_at: usize, ttl_secs: usize) -> Self {
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at,
            exp: issued_at + ttl_secs,
        }
    }
}
