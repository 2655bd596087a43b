/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The SQLite pool (users table)
 * - The token service, shared read-only behind an `Arc`
 * - The document store (products, baskets)
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only the part of the
 * state they use, e.g. `State<SqlitePool>` or `State<Arc<TokenService>>`.
 * The `CurrentPrincipal` guard relies on the `Arc<TokenService>` one.
 *
 * # Example
 *
 * ```rust,no_run
 * use std::sync::Arc;
 * use axum::extract::State;
 * use storefront::backend::auth::TokenService;
 *
 * async fn handler(State(tokens): State<Arc<TokenService>>) {
 *     let _ttl = tokens.default_ttl();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::credentials::SqlCredentialStore;
use crate::backend::auth::sessions::TokenService;
use crate::backend::server::config::AuthConfig;
use crate::backend::shop::DocumentStore;

/// Application state
///
/// Cloned into every handler; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Token issuance and validation
    pub tokens: Arc<TokenService>,

    /// Product and basket documents
    pub documents: DocumentStore,
}

impl AppState {
    /// State whose token service resolves subjects against the `users` table
    pub fn new(db_pool: SqlitePool, auth: &AuthConfig) -> Self {
        let store = Arc::new(SqlCredentialStore::new(db_pool.clone()));
        let tokens = Arc::new(TokenService::new(auth, store));
        Self::with_token_service(db_pool, tokens)
    }

    /// State with a caller-built token service (custom store or clock)
    pub fn with_token_service(db_pool: SqlitePool, tokens: Arc<TokenService>) -> Self {
        Self {
            documents: DocumentStore::new(db_pool.clone()),
            db_pool,
            tokens,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for DocumentStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.documents.clone()
    }
}
