//! Persistence collaborator contract.
//!
//! The auth core issues no queries and owns no schema; it reaches
//! whatever store the host wires in through [`UserStore`]. Implementations
//! must enforce email uniqueness inside `insert` itself: the service
//! pre-checks for a friendlier error, but two concurrent registrations
//! can both pass that pre-check, and only the store can settle the race.

use crate::account::User;
use crate::types::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub mod memory;

/// Key-value lookups the auth core needs from persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by lowercased email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Look up a user by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Insert a new user.
    ///
    /// Must reject a duplicate email with
    /// [`AuthError::Conflict`](crate::types::AuthError::Conflict), even
    /// when the inserts race.
    async fn insert(&self, user: User) -> Result<()>;

    /// Persist changes to an existing user.
    async fn save(&self, user: User) -> Result<()>;
}
