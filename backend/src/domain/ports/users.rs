//! Port for platform user lookups backing authentication.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::User;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "user store connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "user store query failed: {message}",
    }
}

/// Read-side port resolving API-key fingerprints to users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the user owning the API key with this SHA-256 hex fingerprint.
    ///
    /// Returns `None` when no user matches.
    async fn find_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<User>, UserStoreError>;
}

/// In-memory fixture store for tests and database-less startup.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user, keyed by their fingerprint.
    pub async fn add(&self, user: User) {
        self.users
            .write()
            .await
            .insert(user.key_fingerprint.clone(), user);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.get(fingerprint).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::actor::Role;
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn fixture_store_round_trips() {
        let store = InMemoryUserStore::new();
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "ops@example.com".to_owned(),
            display_name: "Ops".to_owned(),
            role: Role::Admin,
            grants: Vec::new(),
            key_fingerprint: "ab".repeat(32),
            created_at: now,
            updated_at: now,
        };
        store.add(user.clone()).await;

        let found = store
            .find_by_fingerprint(&user.key_fingerprint)
            .await
            .expect("lookup succeeds");
        assert_eq!(found, Some(user));

        let missing = store
            .find_by_fingerprint("unknown")
            .await
            .expect("lookup succeeds");
        assert!(missing.is_none());
    }
}
