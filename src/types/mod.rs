//! Common types shared across the authentication core.

use crate::account::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============= Token Types =============

/// Claims carried by issued tokens.
///
/// Access tokens carry `email` and `role` alongside the subject; refresh
/// tokens carry only the subject plus a `type: "refresh"` marker, so a
/// leaked refresh token discloses less.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's persisted identifier.
    pub sub: String,
    /// Principal email (access tokens only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Principal role (access tokens only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// `"refresh"` on refresh tokens, absent on access tokens.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Expiry as a Unix timestamp.
    pub exp: usize,
    /// Issue time as a Unix timestamp.
    pub iat: usize,
}

/// Access/refresh token pair returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived RS256 access token.
    pub access_token: String,
    /// Long-lived RS256 refresh token.
    pub refresh_token: String,
    /// Access token validity in seconds.
    pub expires_in: i64,
}

// ============= Service Outcomes =============

/// Outcome of a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    /// Identifier of the newly created account.
    pub user_id: Uuid,
    /// Normalized email the account was created with.
    pub email: String,
}

/// Principal summary returned alongside tokens.
///
/// Deliberately has no field for the password hash; it cannot leak
/// through here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// Account identifier.
    pub user_id: Uuid,
    /// Account email.
    pub email: String,
    /// Current role.
    pub role: Role,
    /// Current spendable point balance.
    pub point_balance: u32,
}

/// Outcome of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Freshly issued token pair.
    pub tokens: TokenPair,
    /// Summary of the authenticated principal.
    pub user: UserSummary,
}

// ============= Error Types =============

/// Error taxonomy of the authentication core.
///
/// The first five variants are expected, caller-recoverable outcomes the
/// transport maps onto distinct status buckets. `Store` and `Internal`
/// are infrastructure failures and should abort the surrounding request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Policy or format violation; the caller can correct and retry.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Identifier already taken; the caller must choose another.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials or an invalid, expired, or missing token. Messages
    /// stay generic to prevent account enumeration.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Valid identity with insufficient privilege or an unusable account.
    /// May disclose account status.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Business-rule rejection (age, region); not a security event.
    #[error("Eligibility error: {0}")]
    Eligibility(String),

    /// Persistence collaborator failure.
    #[error("Store error: {0}")]
    Store(String),

    /// Unexpected internal failure (key material, hashing).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AuthError>;
