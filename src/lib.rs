//! Storefront - Main Library
//!
//! Storefront is a small e-commerce backend (users, products, baskets) served
//! over HTTP with Axum and protected by bearer-token authentication.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared by the server and by API clients
//!   - Product and basket documents, response envelopes
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Credential store, password hashing, JWT issuance and validation
//!   - Authentication guard for protected routes
//!   - Document persistence in SQLite via sqlx
//!   - Route configuration and server initialization
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use storefront::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
