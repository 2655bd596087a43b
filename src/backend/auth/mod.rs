//! Authentication Module
//!
//! Password verification, JWT issuance and validation, and the HTTP handlers
//! for logging in, registering and managing users.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Principal model and database operations
//! ├── credentials.rs  - CredentialStore trait and implementations
//! ├── password.rs     - bcrypt hashing on the blocking pool
//! ├── clock.rs        - Time source for expiry checks
//! ├── sessions.rs     - TokenService: authenticate, issue, validate
//! ├── error.rs        - AuthFailure and AuthError
//! └── handlers/       - HTTP handlers
//!     ├── types.rs    - Request/response types
//!     ├── login.rs    - POST /token
//!     ├── signup.rs   - POST /user
//!     ├── me.rs       - GET /users/me
//!     └── users.rs    - GET /user, GET/PUT/DELETE /user/{id}
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Login**: form `username` + `password` → credentials verified → JWT returned
//! 2. **Protected call**: `Authorization: Bearer <jwt>` → token validated → principal resolved
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt and compared only through `bcrypt::verify`
//! - The signing secret comes from configuration, never from source
//! - Every authentication failure answers 401 with the same body

/// User data model and database operations
pub mod users;

/// Credential lookup
pub mod credentials;

/// Password hashing
pub mod password;

/// Time source
pub mod clock;

/// JWT token generation and validation
pub mod sessions;

/// Authentication errors
pub mod error;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::{CredentialStore, InMemoryCredentialStore, SqlCredentialStore};
pub use error::{AuthError, AuthFailure};
pub use handlers::{get_me, login, register_user};
pub use sessions::{AccessToken, Claims, TokenService};
pub use users::Principal;
