//! Middleware Module
//!
//! Request guards that run before handlers.
//!
//! - **`auth`** - Bearer token guard for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront::backend::middleware::CurrentPrincipal;
//!
//! async fn protected(CurrentPrincipal(user): CurrentPrincipal) -> String {
//!     user.username
//! }
//! ```

pub mod auth;

pub use auth::{bearer_token, require_authenticated_principal, CurrentPrincipal};
