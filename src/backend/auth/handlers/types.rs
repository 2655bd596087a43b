/**
 * Authentication Handler Types
 *
 * Request and response types for the login, registration and user handlers.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::Principal;

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Token response returned by a successful login
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// User registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Plaintext, hashed before storage
    pub password: String,
    pub national_id: String,
}

/// Partial user update
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext, hashed before storage
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
}

/// User response (without the password hash)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub disabled: bool,
}

impl From<Principal> for UserResponse {
    fn from(user: Principal) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            national_id: user.national_id,
            disabled: user.disabled,
        }
    }
}
