/**
 * Authentication Guard
 *
 * Protects routes that require a bearer token. The guard reads the
 * `Authorization: Bearer <token>` header, validates the token through the
 * `TokenService` and hands the resolved principal to the handler.
 *
 * Any failure (missing header, wrong scheme, bad signature, expired token,
 * unknown subject, disabled account) becomes a 401 carrying
 * `WWW-Authenticate: Bearer`. The specific reason is logged, never returned.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::auth::error::AuthFailure;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::Principal;
use crate::backend::error::BackendError;

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme match is case-insensitive. Returns `None` when the header is
/// absent, not valid ASCII, uses another scheme or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the request's bearer token to an active principal
///
/// # Errors
///
/// `BackendError::Unauthenticated` for every rejection, or the underlying
/// error when the credential store itself fails.
pub async fn require_authenticated_principal(
    tokens: &TokenService,
    headers: &HeaderMap,
) -> Result<Principal, BackendError> {
    let Some(token) = bearer_token(headers) else {
        tracing::warn!(reason = AuthFailure::InvalidToken.kind(), "Missing or malformed Authorization header");
        return Err(BackendError::Unauthenticated(AuthFailure::InvalidToken));
    };

    match tokens.validate_token(token).await {
        Ok(principal) => Ok(principal),
        Err(e) => {
            match e.failure() {
                Some(failure) => tracing::warn!(reason = failure.kind(), "Rejected bearer token"),
                None => tracing::error!("Token validation failed: {}", e),
            }
            Err(e.into())
        }
    }
}

/// Axum extractor for the authenticated principal
///
/// Works with any router state that exposes an `Arc<TokenService>` via
/// `FromRef`.
#[derive(Clone, Debug)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenService>::from_ref(state);
        let principal = require_authenticated_principal(&tokens, &parts.headers).await?;
        Ok(CurrentPrincipal(principal))
    }
}
