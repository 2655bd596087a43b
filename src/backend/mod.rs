//! Backend Module
//!
//! All server-side code for the storefront API. Only compiled with the `ssr`
//! feature.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, app construction
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Credential store, password hashing, JWT tokens, login, users
//! - **`middleware`** - Authentication guard for protected handlers
//! - **`shop`** - Products and baskets CRUD over the document store
//! - **`error`** - Backend error type and its HTTP rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── server/         - Config, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request guards
//! ├── shop/           - CRUD handlers and document store
//! └── error/          - Error types
//! ```
//!
//! # Thread Safety
//!
//! The token service holds only read-only key material and is shared through
//! `Arc`. The SQLite pool is internally synchronized. Handlers are
//! `Send + Sync`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Request guards
pub mod middleware;

/// Products and baskets
pub mod shop;

pub use error::BackendError;
pub use server::create_app;
