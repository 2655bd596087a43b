/**
 * Backend Error Types
 *
 * `BackendError` is what handlers return. Authentication failures of every
 * kind collapse into a 401; the `AuthFailure` they carry is only used for
 * logging. Store and internal failures become a 500 with a generic message.
 *
 * `StoreError` covers persistence failures shared by the credential store and
 * the document store.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::error::{AuthError, AuthFailure};

/// Persistence failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document body does not match its resource type
    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Missing, invalid, expired or otherwise unacceptable bearer token
    #[error("Could not validate credentials ({})", .0.kind())]
    Unauthenticated(AuthFailure),

    /// Login with an unknown username or wrong password
    #[error("Incorrect username or password")]
    InvalidLogin,

    /// Resource lookup found nothing
    #[error("{error}: {message}")]
    NotFound { error: String, message: String },

    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Token service failure that is not the caller's fault
    #[error("Authentication service error: {0}")]
    Auth(#[source] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            error: error.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthenticated(_) | Self::InvalidLogin => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Auth(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal failures are not described.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Unauthenticated(_) => "Could not validate credentials".to_string(),
            Self::InvalidLogin => "Incorrect username or password".to_string(),
            Self::NotFound { message, .. } => message.clone(),
            Self::Conflict(message) => message.clone(),
            Self::Auth(_) | Self::Store(_) => "Internal server error".to_string(),
        }
    }
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Rejected(AuthFailure::InvalidCredentials) => Self::InvalidLogin,
            AuthError::Rejected(failure) => Self::Unauthenticated(failure),
            AuthError::SecretTooLong => {
                Self::handler(StatusCode::BAD_REQUEST, "Password must be at most 71 bytes")
            }
            other => Self::Auth(other),
        }
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(StoreError::Database(err))
    }
}
