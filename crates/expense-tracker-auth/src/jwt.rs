//! JWT creation and verification.
//!
//! Tokens are signed with HMAC-SHA256 using [`JwtConfig::secret`]. Verification
//! accepts HS256 only, checks the signature, and rejects tokens whose `exp` is
//! in the past. No clock leeway is applied.
//!
//! Every verification failure maps to the same `401 Invalid token` error; the
//! cause is never reported to the client.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use expense_tracker_config::JwtConfig;
use expense_tracker_core::AppError;

use crate::claims::Claims;

/// Signs an arbitrary claim set.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Issues an access token for a user, valid for `jwt_config.token_ttl_secs`.
///
/// # Example
///
/// ```ignore
/// let token = create_access_token(user.id, &user.email, &state.jwt_config)?;
/// ```
pub fn create_access_token(
    user_id: i64,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims::new(user_id, email, now, jwt_config.token_ttl_secs as usize);

    encode_claims(&claims, jwt_config)
}

/// Verifies a token and returns its claims.
///
/// # Errors
///
/// Returns `401 Invalid token` if the signature does not match, the algorithm
/// is not HS256, the token is malformed, or it has expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow!("Invalid token")))
}
