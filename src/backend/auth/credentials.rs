/**
 * Credential Store
 *
 * The token service resolves identifiers through the `CredentialStore` trait
 * and never touches storage directly. A missing principal is `Ok(None)`;
 * `Err` is reserved for backend failures.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::backend::auth::users::{get_user_by_username, Principal};
use crate::backend::error::StoreError;

/// Lookup from principal identifier to stored credential record
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn lookup(&self, identifier: &str) -> Result<Option<Principal>, StoreError>;
}

/// Credential store kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    principals: Arc<RwLock<HashMap<String, Principal>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store from an initial set of principals, keyed by username
    pub fn with_principals(principals: impl IntoIterator<Item = Principal>) -> Self {
        let map = principals
            .into_iter()
            .map(|p| (p.username.clone(), p))
            .collect();
        Self {
            principals: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a principal
    pub async fn insert(&self, principal: Principal) {
        self.principals
            .write()
            .await
            .insert(principal.username.clone(), principal);
    }

    /// Set the disabled flag
    ///
    /// # Returns
    /// False if no principal has this identifier
    pub async fn set_disabled(&self, identifier: &str, disabled: bool) -> bool {
        match self.principals.write().await.get_mut(identifier) {
            Some(principal) => {
                principal.disabled = disabled;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, identifier: &str) -> Option<Principal> {
        self.principals.write().await.remove(identifier)
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn lookup(&self, identifier: &str) -> Result<Option<Principal>, StoreError> {
        Ok(self.principals.read().await.get(identifier).cloned())
    }
}

/// Credential store backed by the `users` table
#[derive(Clone)]
pub struct SqlCredentialStore {
    pool: SqlitePool,
}

impl SqlCredentialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for SqlCredentialStore {
    async fn lookup(&self, identifier: &str) -> Result<Option<Principal>, StoreError> {
        Ok(get_user_by_username(&self.pool, identifier).await?)
    }
}
