//! Route Configuration Module
//!
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── api_routes.rs   - Token, current user and user routes
//! └── shop_routes.rs  - Product and basket routes
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront::backend::routes::create_router;
//! use storefront::backend::server::{AppState, AuthConfig};
//! use storefront::backend::server::config::connect_database;
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let pool = connect_database("sqlite::memory:").await?;
//! let router = create_router(AppState::new(pool, &AuthConfig::new("change-me")));
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// Token, current user and user routes
pub mod api_routes;

/// Product and basket routes
pub mod shop_routes;

pub use router::create_router;
