/**
 * Login Handler
 *
 * POST /token with form fields `username` and `password`.
 *
 * 1. Verify the credentials through the token service
 * 2. Issue a JWT with the configured default lifetime
 * 3. Return `{"access_token": ..., "token_type": "bearer"}`
 *
 * A request missing either field is rejected by the `Form` extractor before
 * this handler runs. Unknown users and wrong passwords both answer 401.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json, Form};

use crate::backend::auth::handlers::types::{LoginForm, TokenResponse};
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown user or wrong password
/// * `500 Internal Server Error` - credential store, hashing or signing failure
///
/// # Example Request
///
/// ```http
/// POST /token HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// username=johndoe&password=secret
/// ```
pub async fn login(
    State(tokens): State<Arc<TokenService>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, BackendError> {
    tracing::info!("Login request for: {}", form.username);

    let principal = tokens.authenticate(&form.username, &form.password).await?;
    let token = tokens.issue_default_token(&principal)?;

    tracing::info!(
        "User logged in successfully: {} (token expires {})",
        principal.username,
        token.expires_at
    );

    Ok(Json(TokenResponse::bearer(token.token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::credentials::InMemoryCredentialStore;
    use crate::backend::auth::password::hash_password_with_cost;
    use crate::backend::auth::users::Principal;
    use crate::backend::server::config::AuthConfig;
    use assert_matches::assert_matches;

    async fn tokens() -> Arc<TokenService> {
        let hash = hash_password_with_cost("secret123", 4).await.unwrap();
        let store = InMemoryCredentialStore::with_principals([Principal::new("johndoe", hash)]);
        Arc::new(TokenService::new(&AuthConfig::new("test-secret"), Arc::new(store)))
    }

    fn form(username: &str, password: &str) -> Form<LoginForm> {
        Form(LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_login_success() {
        let tokens = tokens().await;
        let Json(response) = login(State(tokens.clone()), form("johndoe", "secret123"))
            .await
            .unwrap();
        assert_eq!(response.token_type, "bearer");

        let principal = tokens.validate_token(&response.access_token).await.unwrap();
        assert_eq!(principal.username, "johndoe");
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let result = login(State(tokens().await), form("johndoe", "wrongpassword")).await;
        assert_matches!(result, Err(BackendError::InvalidLogin));
    }

    #[tokio::test]
    async fn test_login_user_not_found() {
        let result = login(State(tokens().await), form("nonexistent", "secret123")).await;
        assert_matches!(result, Err(BackendError::InvalidLogin));
    }
}
