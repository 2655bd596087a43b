/**
 * Password Hashing
 *
 * bcrypt is deliberately slow, so both hashing and verification run on the
 * blocking thread pool instead of the async workers.
 *
 * bcrypt only reads the first 72 bytes of its input, trailing NUL included, so
 * passwords are limited to 71 bytes. Longer passwords are refused when hashing
 * and never match when verifying, so two passwords that share a long prefix
 * are never interchangeable.
 */

use bcrypt::{non_truncating_hash, non_truncating_verify, BcryptError};

use crate::backend::auth::error::AuthError;

/// bcrypt cost used for new hashes
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Hash a plaintext password
///
/// # Returns
/// bcrypt hash string (starts with `$2b$`)
pub async fn hash_password(password: &str) -> Result<String, AuthError> {
    hash_password_with_cost(password, HASH_COST).await
}

/// Hash with an explicit cost. Tests use the minimum cost to stay fast.
///
/// # Errors
/// `AuthError::SecretTooLong` if the password is longer than 71 bytes
pub async fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_owned();
    match tokio::task::spawn_blocking(move || non_truncating_hash(password, cost)).await? {
        Ok(hashed) => Ok(hashed),
        Err(BcryptError::Truncation(_)) => Err(AuthError::SecretTooLong),
        Err(e) => Err(e.into()),
    }
}

/// Check a plaintext password against a stored bcrypt hash
///
/// # Returns
/// * `Ok(true)` - password matches
/// * `Ok(false)` - password does not match, or is longer than 71 bytes
/// * `Err(_)` - the stored hash is not a valid bcrypt hash
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    let verified =
        tokio::task::spawn_blocking(move || non_truncating_verify(password, &password_hash)).await?;
    match verified {
        Ok(matches) => Ok(matches),
        Err(BcryptError::Truncation(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hashed = hash_password_with_cost("secret123", 4).await.unwrap();
        assert!(hashed.starts_with("$2b$"));
        assert_ne!(hashed, "secret123");

        assert!(verify_password("secret123", &hashed).await.unwrap());
        assert!(!verify_password("secret124", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let first = hash_password_with_cost("secret123", 4).await.unwrap();
        let second = hash_password_with_cost("secret123", 4).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_known_hash() {
        // bcrypt of "secret"
        let known = "$2b$12$EixZaYVK1fsbw1ZfbX3OXePaWxn96p36WQoeG6Lruj3vjPGga31lW";
        assert!(verify_password("secret", known).await.unwrap());
    }

    #[tokio::test]
    async fn test_password_over_71_bytes_is_refused() {
        let long = "a".repeat(72);
        let result = hash_password_with_cost(&long, 4).await;
        assert!(matches!(result, Err(AuthError::SecretTooLong)));

        let exact = "a".repeat(71);
        let hashed = hash_password_with_cost(&exact, 4).await.unwrap();
        assert!(verify_password(&exact, &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_shared_prefix_does_not_match() {
        let prefix = "p".repeat(71);
        let hashed = hash_password_with_cost(&prefix, 4).await.unwrap();

        assert!(!verify_password(&format!("{prefix}x"), &hashed).await.unwrap());
        assert!(!verify_password(&format!("{prefix}anything else"), &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        assert!(verify_password("secret", "not-a-hash").await.is_err());
    }
}
