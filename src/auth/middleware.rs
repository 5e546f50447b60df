//! Authorization guard for protected operations.
//!
//! Transport-agnostic: the host extracts the Authorization header value,
//! [`bearer_token`] strips the scheme, and [`AuthGuard::authenticate`]
//! turns the raw token into a live, active [`User`]. Role checks are pure
//! functions that pass the user through on success, so gates chain.

use crate::account::{Role, User};
use crate::auth::jwt::TokenCodec;
use crate::store::UserStore;
use crate::types::{AuthError, Result};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Strip the `Bearer ` scheme from an Authorization header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

/// Verifies bearer tokens and enforces the account-status gate before a
/// protected operation runs.
pub struct AuthGuard {
    store: Arc<dyn UserStore>,
    codec: Arc<TokenCodec>,
}

impl AuthGuard {
    /// Build a guard over the given store and codec.
    pub fn new(store: Arc<dyn UserStore>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    /// Resolve a raw bearer token to an active principal.
    ///
    /// Token and lookup failures are authentication errors. An inactive
    /// account behind a valid token is an authorization error whose
    /// message names the current status for operator support; that is a
    /// post-authentication disclosure, not an enumeration risk.
    pub async fn authenticate(&self, raw_token: &str) -> Result<User> {
        let Some(claims) = self.codec.verify(raw_token) else {
            return Err(AuthError::Authentication(
                "Invalid or expired credentials".to_string(),
            ));
        };

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::Authentication("Invalid token payload".to_string()))?;

        let Some(user) = self.store.find_by_id(user_id).await? else {
            debug!(%user_id, "token subject not found");
            return Err(AuthError::Authentication("User not found".to_string()));
        };

        if !user.is_active() {
            return Err(AuthError::Authorization(format!(
                "Account is {}. Please contact support.",
                user.status
            )));
        }

        Ok(user)
    }
}

/// Require the principal to hold one of `allowed_roles`.
///
/// Pure check: the user passes through unchanged on success so gates can
/// chain after [`AuthGuard::authenticate`].
pub fn require_role(user: User, allowed_roles: &[Role]) -> Result<User> {
    if allowed_roles.contains(&user.role) {
        Ok(user)
    } else {
        let required = allowed_roles
            .iter()
            .map(Role::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(AuthError::Authorization(format!(
            "Insufficient permissions. Required role: {}",
            required
        )))
    }
}

/// Admin-only gate. Exactly [`require_role`] with [`Role::Admin`], so the
/// two can never drift apart.
pub fn require_admin(user: User) -> Result<User> {
    require_role(user, &[Role::Admin])
}
