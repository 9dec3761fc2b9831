//! # Expense Tracker Auth
//!
//! Bearer token support for the Expense Tracker API.
//!
//! - [`claims`]: the claim set carried by every access token
//! - [`jwt`]: HS256 signing and verification
//!
//! Tokens are stateless. Logging out does not revoke anything; a token stays
//! valid until its `exp` passes.
//!
//! # Example
//!
//! ```ignore
//! use expense_tracker_auth::{create_access_token, verify_token};
//! use expense_tracker_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(42, "ada@example.com", &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, "42");
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, encode_claims, verify_token};
