/**
 * Session Management and JWT Tokens
 *
 * `TokenService` turns a username and password into a signed, time-limited
 * JWT, and turns a presented JWT back into a `Principal`.
 *
 * Validation is a single pass with no caching:
 *
 * 1. Decode and verify the signature (`InvalidToken` on any failure)
 * 2. Compare `exp` with the service clock (`Expired`)
 * 3. Resolve `sub` in the credential store (`UnknownSubject`)
 * 4. Reject disabled principals (`Disabled`)
 *
 * The library's own expiry check is turned off so that step 2 uses the
 * injected `Clock`.
 */

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::auth::clock::{Clock, SystemClock};
use crate::backend::auth::credentials::CredentialStore;
use crate::backend::auth::error::{AuthError, AuthFailure};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::users::Principal;
use crate::backend::server::config::AuthConfig;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal identifier (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// A freshly issued token
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates bearer tokens
pub struct TokenService {
    store: Arc<dyn CredentialStore>,
    clock: Arc<dyn Clock>,
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(config.jwt_algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            store,
            clock: Arc::new(SystemClock),
            algorithm: config.jwt_algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_ttl: config.access_token_ttl,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Verify an identifier and plaintext secret
    ///
    /// Unknown identifiers and wrong secrets both fail with
    /// `AuthFailure::InvalidCredentials`.
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Principal, AuthError> {
        let Some(principal) = self.store.lookup(identifier).await? else {
            tracing::warn!(
                reason = AuthFailure::InvalidCredentials.kind(),
                "Login for unknown user: {}",
                identifier
            );
            return Err(AuthFailure::InvalidCredentials.into());
        };

        if !verify_password(secret, &principal.password_hash).await? {
            tracing::warn!(
                reason = AuthFailure::InvalidCredentials.kind(),
                "Invalid password for user: {}",
                identifier
            );
            return Err(AuthFailure::InvalidCredentials.into());
        }

        Ok(principal)
    }

    /// Sign a token for `principal` that expires `ttl` from now
    pub fn issue_token(&self, principal: &Principal, ttl: Duration) -> Result<AccessToken, AuthError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(AuthError::LifetimeOutOfRange)?;

        let claims = Claims {
            sub: principal.username.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(AuthError::Encoding)?;

        Ok(AccessToken { token, expires_at })
    }

    /// Sign a token with the configured default lifetime
    pub fn issue_default_token(&self, principal: &Principal) -> Result<AccessToken, AuthError> {
        self.issue_token(principal, self.default_ttl)
    }

    /// Resolve a presented token to its principal
    pub async fn validate_token(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token decode failed: {}", e);
                AuthFailure::InvalidToken
            })?
            .claims;

        if claims.exp < self.clock.now().timestamp() {
            return Err(AuthFailure::Expired.into());
        }

        let principal = self
            .store
            .lookup(&claims.sub)
            .await?
            .ok_or(AuthFailure::UnknownSubject)?;

        if principal.disabled {
            return Err(AuthFailure::Disabled.into());
        }

        Ok(principal)
    }
}
