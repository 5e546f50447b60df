//! RS256 token issuance and verification.
//!
//! Tokens are standard three-segment JWTs (header, claims, signature in
//! base64url) signed with an RSA private key and verified with the
//! matching public key. The codec holds the two keys as distinct values,
//! loaded once at startup, so a deployment can swap the verification key
//! without touching issuance.

use crate::account::Role;
use crate::types::{AuthError, Claims, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// Default access token lifetime in minutes.
pub const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// Default refresh token lifetime in days. Always longer than the access
/// token lifetime.
pub const REFRESH_TOKEN_EXPIRE_DAYS: i64 = 7;

/// Claim value marking refresh tokens.
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Signs and verifies bearer tokens with an RSA key pair.
///
/// Immutable once constructed; share it behind an `Arc` for unlimited
/// concurrent readers.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from PEM-encoded RSA keys held in memory.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| AuthError::Internal(format!("Invalid RSA private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| AuthError::Internal(format!("Invalid RSA public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            access_ttl: Duration::minutes(ACCESS_TOKEN_EXPIRE_MINUTES),
            refresh_ttl: Duration::days(REFRESH_TOKEN_EXPIRE_DAYS),
        })
    }

    /// Load a codec from PEM key files.
    ///
    /// Fails fast if either file is unreadable or not a valid RSA key;
    /// call this once at process startup.
    pub fn from_pem_files(
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let private_pem = std::fs::read(&private_path).map_err(|e| {
            AuthError::Internal(format!(
                "Failed to read private key {}: {}",
                private_path.as_ref().display(),
                e
            ))
        })?;
        let public_pem = std::fs::read(&public_path).map_err(|e| {
            AuthError::Internal(format!(
                "Failed to read public key {}: {}",
                public_path.as_ref().display(),
                e
            ))
        })?;

        Self::from_pem(&private_pem, &public_pem)
    }

    /// Override the default token lifetimes.
    pub fn with_ttls(mut self, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        self.access_ttl = access_ttl;
        self.refresh_ttl = refresh_ttl;
        self
    }

    /// Configured access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Issue a signed access token carrying subject, email, and role.
    pub fn issue_access(&self, user_id: Uuid, email: &str, role: Role) -> Result<String> {
        self.issue_access_with_ttl(user_id, email, role, self.access_ttl)
    }

    /// Issue an access token with an explicit lifetime.
    pub fn issue_access_with_ttl(
        &self,
        user_id: Uuid,
        email: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: Some(email.to_string()),
            role: Some(role),
            token_type: None,
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        self.sign(&claims)
    }

    /// Issue a signed refresh token.
    ///
    /// Minimal claim set: subject and the `refresh` marker only, so a
    /// leaked refresh token carries neither email nor role.
    pub fn issue_refresh(&self, user_id: Uuid) -> Result<String> {
        self.issue_refresh_with_ttl(user_id, self.refresh_ttl)
    }

    /// Issue a refresh token with an explicit lifetime.
    pub fn issue_refresh_with_ttl(&self, user_id: Uuid, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: None,
            role: None,
            token_type: Some(REFRESH_TOKEN_TYPE.to_string()),
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        self.sign(&claims)
    }

    /// Verify a token's signature and expiry.
    ///
    /// All failure modes (expired, malformed, wrong signature, wrong
    /// algorithm) collapse to `None` so callers cannot probe which check
    /// failed; the concrete cause is logged at debug level only.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::RS256);
        // No leeway: a token expired by one second is expired.
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "token verification failed");
                None
            }
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::RS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {}", e)))
    }
}
