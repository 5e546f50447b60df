//! In-memory reference store.

use super::UserStore;
use crate::account::User;
use crate::types::{AuthError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// `HashMap`-backed [`UserStore`].
///
/// The write lock makes insert's check-and-put a single atomic step,
/// which is what enforces the email uniqueness constraint when
/// registrations race. Useful for tests and non-durable embedded hosts.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read();
        Ok(users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<()> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::Conflict(
                "Email address already exists".to_string(),
            ));
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn save(&self, user: User) -> Result<()> {
        let mut users = self.users.write();
        match users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user;
                Ok(())
            }
            None => Err(AuthError::Store(format!("No such user: {}", user.id))),
        }
    }
}
