//! Password hashing and strength policy.
//!
//! Hashing uses bcrypt with a deliberately slow, documented work factor.
//! Hashing is total: the empty string hashes fine, because length rules
//! belong to [`validate_password_strength`], not the hasher.

use crate::types::{AuthError, Result};

/// Bcrypt work factor used for all new hashes.
pub const BCRYPT_COST: u32 = 12;

/// Minimum password length accepted by the policy.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Characters accepted as the special-character class.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Hash a password with bcrypt at [`BCRYPT_COST`].
///
/// A fresh random salt is generated per call, so hashing the same
/// password twice yields two different strings that both verify.
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_cost(password, BCRYPT_COST)
}

/// Hash a password with an explicit work factor.
///
/// Deployments tune the factor through configuration; the default stays
/// [`BCRYPT_COST`].
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost)
        .map_err(|e| AuthError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a candidate password against a stored bcrypt hash.
///
/// The comparison is bcrypt's constant-time check. A malformed hash
/// verifies as `false` rather than erroring.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Result of a password strength check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyVerdict {
    /// Whether the password passed every rule.
    pub valid: bool,
    /// Stable, user-facing explanation.
    pub message: &'static str,
}

impl PolicyVerdict {
    fn ok() -> Self {
        Self {
            valid: true,
            message: "Password is strong",
        }
    }

    fn fail(message: &'static str) -> Self {
        Self {
            valid: false,
            message,
        }
    }
}

/// Validate password strength.
///
/// Rules run in a fixed order and the first failure wins, so a password
/// violating several rules always reports the same message: length,
/// uppercase, lowercase, digit, special character.
pub fn validate_password_strength(password: &str) -> PolicyVerdict {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return PolicyVerdict::fail("Password must be at least 12 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return PolicyVerdict::fail("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return PolicyVerdict::fail("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return PolicyVerdict::fail("Password must contain at least one digit");
    }

    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return PolicyVerdict::fail("Password must contain at least one special character");
    }

    PolicyVerdict::ok()
}
