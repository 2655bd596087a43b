/**
 * Server Configuration
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by the binary before this runs). The signing secret has no default: the
 * server refuses to start without `JWT_SECRET`.
 *
 * | Variable                      | Default                           |
 * |-------------------------------|-----------------------------------|
 * | `JWT_SECRET`                  | required                          |
 * | `JWT_ALGORITHM`               | `HS256`                           |
 * | `ACCESS_TOKEN_EXPIRE_MINUTES` | `30`                              |
 * | `DATABASE_URL`                | `sqlite://storefront.db?mode=rwc` |
 * | `SERVER_PORT`                 | `8000`                            |
 */

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::HS256;
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://storefront.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name,
            reason: reason.into(),
        }
    }
}

/// Token signing configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric HMAC secret
    pub jwt_secret: String,
    /// One of HS256, HS384, HS512
    pub jwt_algorithm: Algorithm,
    /// Lifetime of tokens issued at login
    pub access_token_ttl: Duration,
}

impl AuthConfig {
    /// Config with the given secret and default algorithm and lifetime
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_algorithm: DEFAULT_ALGORITHM,
            access_token_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.jwt_algorithm = algorithm;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = var("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let jwt_algorithm = match var("JWT_ALGORITHM") {
            Some(name) => parse_algorithm(&name)?,
            None => DEFAULT_ALGORITHM,
        };

        let access_token_ttl = match var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => {
                let minutes: i64 = raw.trim().parse().map_err(|e| {
                    ConfigError::invalid("ACCESS_TOKEN_EXPIRE_MINUTES", format!("{e}"))
                })?;
                if minutes <= 0 {
                    return Err(ConfigError::invalid(
                        "ACCESS_TOKEN_EXPIRE_MINUTES",
                        "must be positive",
                    ));
                }
                Duration::try_minutes(minutes).ok_or_else(|| {
                    ConfigError::invalid("ACCESS_TOKEN_EXPIRE_MINUTES", "out of range")
                })?
            }
            None => Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        };

        Ok(Self {
            jwt_secret,
            jwt_algorithm,
            access_token_ttl,
        })
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

/// Only HMAC algorithms work with a shared secret
fn parse_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|_| ConfigError::invalid("JWT_ALGORITHM", format!("unknown algorithm {name}")))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(ConfigError::invalid(
            "JWT_ALGORITHM",
            format!("{other:?} is not a symmetric algorithm"),
        )),
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub auth: AuthConfig,
    pub database_url: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let auth = AuthConfig::from_vars(&var)?;
        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let port = match var("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("SERVER_PORT", format!("{e}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            auth,
            database_url,
            port,
        })
    }
}

/// Open the SQLite pool and run migrations
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    tracing::info!("Connecting to database...");
    let pool = pool_options.connect_with(options).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serial_test::serial;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_vars(vars(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.auth.jwt_algorithm, Algorithm::HS256);
        assert_eq!(config.auth.access_token_ttl, Duration::minutes(30));
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_missing_secret() {
        assert_matches!(
            AuthConfig::from_vars(vars(&[])),
            Err(ConfigError::MissingValue("JWT_SECRET"))
        );
        assert_matches!(
            AuthConfig::from_vars(vars(&[("JWT_SECRET", "")])),
            Err(ConfigError::MissingValue("JWT_SECRET"))
        );
    }

    #[test]
    fn test_algorithm_parsing() {
        let config =
            AuthConfig::from_vars(vars(&[("JWT_SECRET", "s"), ("JWT_ALGORITHM", "HS512")])).unwrap();
        assert_eq!(config.jwt_algorithm, Algorithm::HS512);

        assert_matches!(
            AuthConfig::from_vars(vars(&[("JWT_SECRET", "s"), ("JWT_ALGORITHM", "RS256")])),
            Err(ConfigError::InvalidValue { name: "JWT_ALGORITHM", .. })
        );
        assert_matches!(
            AuthConfig::from_vars(vars(&[("JWT_SECRET", "s"), ("JWT_ALGORITHM", "nope")])),
            Err(ConfigError::InvalidValue { name: "JWT_ALGORITHM", .. })
        );
    }

    #[test]
    fn test_ttl_must_be_positive() {
        let config = AuthConfig::from_vars(vars(&[
            ("JWT_SECRET", "s"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "45"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_ttl, Duration::minutes(45));

        assert_matches!(
            AuthConfig::from_vars(vars(&[("JWT_SECRET", "s"), ("ACCESS_TOKEN_EXPIRE_MINUTES", "0")])),
            Err(ConfigError::InvalidValue { .. })
        );
    }

    #[test]
    fn test_ttl_out_of_range() {
        assert_matches!(
            AuthConfig::from_vars(vars(&[
                ("JWT_SECRET", "s"),
                ("ACCESS_TOKEN_EXPIRE_MINUTES", "9223372036854775807"),
            ])),
            Err(ConfigError::InvalidValue { .. })
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", AuthConfig::new("super-secret-value"));
        assert!(!rendered.contains("super-secret-value"));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var("JWT_SECRET", "from-env");
        std::env::set_var("SERVER_PORT", "9100");
        let config = ServerConfig::from_env();
        std::env::remove_var("JWT_SECRET");
        std::env::remove_var("SERVER_PORT");

        let config = config.unwrap();
        assert_eq!(config.auth.jwt_secret, "from-env");
        assert_eq!(config.port, 9100);
    }

    #[tokio::test]
    async fn test_connect_in_memory_runs_migrations() {
        let pool = connect_database("sqlite::memory:").await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
