/**
 * Authentication Errors
 *
 * `AuthFailure` is the closed set of reasons a caller can be unauthenticated.
 * Every variant ends the request with a 401; the variant itself only feeds
 * logging. `AuthError` adds the internal failures (store, hashing, signing)
 * that are not the caller's fault.
 */

use thiserror::Error;

use crate::backend::error::StoreError;

/// Why an authentication attempt was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailure {
    /// Unknown identifier or wrong secret; both map here
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token is malformed or its signature does not verify
    #[error("invalid token")]
    InvalidToken,

    /// Token signature is valid but its `exp` claim has passed
    #[error("token expired")]
    Expired,

    /// Token subject no longer resolves to a principal
    #[error("unknown token subject")]
    UnknownSubject,

    /// Token subject resolves to a disabled principal
    #[error("principal disabled")]
    Disabled,
}

impl AuthFailure {
    /// Stable machine-readable name, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidToken => "invalid_token",
            Self::Expired => "expired",
            Self::UnknownSubject => "unknown_subject",
            Self::Disabled => "disabled",
        }
    }
}

/// Errors produced by the token service
#[derive(Debug, Error)]
pub enum AuthError {
    /// The caller is unauthenticated
    #[error(transparent)]
    Rejected(#[from] AuthFailure),

    /// Credential store backend failed
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// bcrypt could not hash or parse a hash
    #[error("password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Password is longer than bcrypt can hash without truncating it
    #[error("password longer than 71 bytes")]
    SecretTooLong,

    /// Claims could not be signed
    #[error("token encoding error: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),

    /// Issue time plus lifetime does not fit in a timestamp
    #[error("token lifetime out of range")]
    LifetimeOutOfRange,

    /// A blocking hashing task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AuthError {
    /// The rejection reason, if this is a caller-facing failure
    pub fn failure(&self) -> Option<AuthFailure> {
        match self {
            Self::Rejected(failure) => Some(*failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds_are_distinct() {
        let kinds = [
            AuthFailure::InvalidCredentials,
            AuthFailure::InvalidToken,
            AuthFailure::Expired,
            AuthFailure::UnknownSubject,
            AuthFailure::Disabled,
        ]
        .map(|f| f.kind());
        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }

    #[test]
    fn test_failure_accessor() {
        let err: AuthError = AuthFailure::Expired.into();
        assert_eq!(err.failure(), Some(AuthFailure::Expired));

        let err = AuthError::Store(StoreError::Database(sqlx::Error::RowNotFound));
        assert_eq!(err.failure(), None);
    }
}
