//! Authentication Configuration
//!
//! All configuration values are loaded from environment variables.
//! No hardcoded secrets or sensitive data.

use crate::error::AuthError;
use std::env;

/// Authentication configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT secret key for signing session tokens (from JWT_SECRET env var)
    pub jwt_secret: String,

    /// Session token lifetime in seconds (from TOKEN_TTL_SECS env var)
    pub token_ttl_secs: i64,

    /// Argon2 memory cost in KiB (from ARGON2_MEMORY_COST env var)
    pub argon2_memory_cost: u32,

    /// Argon2 time cost (iterations) (from ARGON2_TIME_COST env var)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (from ARGON2_PARALLELISM env var)
    pub argon2_parallelism: u32,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// A missing or weak `JWT_SECRET` is a startup error, never a
    /// per-request condition.
    pub fn from_env() -> Result<Self, AuthError> {
        let config = Self {
            jwt_secret: env::var("JWT_SECRET").map_err(|_| {
                AuthError::Config("JWT_SECRET environment variable must be set".to_string())
            })?,

            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86400), // 1 day default

            argon2_memory_cost: env::var("ARGON2_MEMORY_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(65536), // 64 MiB

            argon2_time_cost: env::var("ARGON2_TIME_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),

            argon2_parallelism: env::var("ARGON2_PARALLELISM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.jwt_secret.len() < 32 {
            return Err(AuthError::Config(
                "JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }

        if self.token_ttl_secs <= 0 {
            return Err(AuthError::Config(
                "TOKEN_TTL_SECS must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
