//! Authentication Handlers Module
//!
//! - **`login`** - POST /token - Exchange username and password for a JWT
//! - **`register_user`** - POST /user - Create a user account
//! - **`get_me`** - GET /users/me - Profile of the authenticated user
//! - **`users`** - GET/PUT/DELETE /user and /user/{id} - User administration

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// User list, fetch, update and delete handlers
pub mod users;

pub use types::{LoginForm, RegisterUserRequest, TokenResponse, UpdateUserRequest, UserResponse};

pub use login::login;
pub use me::get_me;
pub use signup::register_user;
