use std::env;

use crate::{ConfigError, parse_or, required};

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl_secs: i64,
}

impl JwtConfig {
    /// Loads `JWT_SECRET` (required) and `JWT_TTL_SECONDS` (default 86400).
    ///
    /// There is no fallback secret: a missing or blank `JWT_SECRET` is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(&lookup, "JWT_SECRET")?;
        let token_ttl_secs = parse_or(&lookup, "JWT_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECS)?;

        if token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_TTL_SECONDS",
                value: token_ttl_secs.to_string(),
            });
        }

        Ok(Self {
            secret,
            token_ttl_secs,
        })
    }
}
