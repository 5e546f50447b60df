//! Environment-driven configuration.
//!
//! Everything the subsystem needs is collected here and injected into the
//! components at construction time; there is no lazily-initialized global
//! state. Key material itself is loaded by
//! [`TokenCodec::from_pem_files`](crate::auth::jwt::TokenCodec::from_pem_files),
//! which fails fast at startup if either file is unreadable.

use crate::auth::jwt::{ACCESS_TOKEN_EXPIRE_MINUTES, REFRESH_TOKEN_EXPIRE_DAYS};
use crate::auth::password::BCRYPT_COST;
use crate::auth::service::{INELIGIBLE_STATES, MINIMUM_AGE};
use crate::types::{AuthError, Result};
use serde::Deserialize;
use std::env;

/// Authentication subsystem configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// PEM file holding the RSA signing key.
    pub private_key_path: String,
    /// PEM file holding the RSA verification key.
    pub public_key_path: String,
    /// Access token lifetime in minutes.
    pub access_ttl_minutes: i64,
    /// Refresh token lifetime in days.
    pub refresh_ttl_days: i64,
    /// Bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
    /// Minimum age to register.
    pub minimum_age: u32,
    /// Region codes where registration is refused.
    pub ineligible_states: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            private_key_path: "keys/jwt_private_key.pem".to_string(),
            public_key_path: "keys/jwt_public_key.pem".to_string(),
            access_ttl_minutes: ACCESS_TOKEN_EXPIRE_MINUTES,
            refresh_ttl_days: REFRESH_TOKEN_EXPIRE_DAYS,
            bcrypt_cost: BCRYPT_COST,
            minimum_age: MINIMUM_AGE,
            ineligible_states: INELIGIBLE_STATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AuthConfig {
    /// Load configuration from the environment, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(AuthConfig {
            private_key_path: env::var("FITTRACK_PRIVATE_KEY_PATH")
                .unwrap_or(defaults.private_key_path),
            public_key_path: env::var("FITTRACK_PUBLIC_KEY_PATH")
                .unwrap_or(defaults.public_key_path),
            access_ttl_minutes: parse_env(
                "FITTRACK_ACCESS_TTL_MINUTES",
                defaults.access_ttl_minutes,
            )?,
            refresh_ttl_days: parse_env("FITTRACK_REFRESH_TTL_DAYS", defaults.refresh_ttl_days)?,
            bcrypt_cost: parse_env("FITTRACK_BCRYPT_COST", defaults.bcrypt_cost)?,
            minimum_age: parse_env("FITTRACK_MINIMUM_AGE", defaults.minimum_age)?,
            ineligible_states: env::var("FITTRACK_INELIGIBLE_STATES")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_uppercase())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.ineligible_states),
        })
    }
}

impl AuthConfig {
    /// Configured access token lifetime.
    pub fn access_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_ttl_minutes)
    }

    /// Configured refresh token lifetime.
    pub fn refresh_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.refresh_ttl_days)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AuthError::Internal(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
