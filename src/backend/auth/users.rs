/**
 * User Model and Database Operations
 *
 * A `Principal` is a user account: the identity tokens are issued for. The
 * row lives in the `users` table; `username` is the unique identifier used as
 * the JWT subject.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// User account as stored in the database
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Principal {
    /// Unique user ID
    pub id: Uuid,
    /// Unique login identifier
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub national_id: Option<String>,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Disabled accounts cannot authenticate with existing tokens
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    /// New enabled principal with no profile attributes
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            first_name: None,
            last_name: None,
            email: None,
            national_id: None,
            password_hash: password_hash.into(),
            disabled: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = Some(national_id.into());
        self
    }
}

/// Field changes for `update_user`. `None` leaves the column untouched.
///
/// The username is fixed at registration since it is the token subject.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub national_id: Option<String>,
    /// Already hashed
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.national_id.is_none()
            && self.password_hash.is_none()
    }

    fn apply_to(self, user: &mut Principal) {
        if let Some(first_name) = self.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = self.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(email) = self.email {
            user.email = Some(email);
        }
        if let Some(national_id) = self.national_id {
            user.national_id = Some(national_id);
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
    }
}

const USER_COLUMNS: &str = "id, username, first_name, last_name, email, national_id, \
                            password_hash, disabled, created_at, updated_at";

/// Insert a new user
///
/// Fails with a database error if the username is already taken.
pub async fn create_user(pool: &SqlitePool, user: &Principal) -> Result<Principal, sqlx::Error> {
    let sql = format!(
        "INSERT INTO users ({USER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
    );

    sqlx::query_as::<_, Principal>(&sql)
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.national_id)
        .bind(&user.password_hash)
        .bind(user.disabled)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(pool)
        .await
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<Principal>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
    sqlx::query_as::<_, Principal>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Principal>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    sqlx::query_as::<_, Principal>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All users, oldest first
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<Principal>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at");
    sqlx::query_as::<_, Principal>(&sql).fetch_all(pool).await
}

/// Apply `changes` to the user with `id`
///
/// # Returns
/// The updated user, or `None` if no user has this ID
pub async fn update_user(
    pool: &SqlitePool,
    id: Uuid,
    changes: UserChanges,
) -> Result<Option<Principal>, sqlx::Error> {
    let Some(mut user) = get_user_by_id(pool, id).await? else {
        return Ok(None);
    };
    changes.apply_to(&mut user);
    user.updated_at = Utc::now();

    let sql = format!(
        "UPDATE users SET first_name = ?, last_name = ?, email = ?, national_id = ?, \
         password_hash = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}"
    );
    sqlx::query_as::<_, Principal>(&sql)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.national_id)
        .bind(&user.password_hash)
        .bind(user.updated_at)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Enable or disable a user
///
/// # Returns
/// True if a user with this username exists
pub async fn set_user_disabled(
    pool: &SqlitePool,
    username: &str,
    disabled: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET disabled = ?, updated_at = ? WHERE username = ?")
        .bind(disabled)
        .bind(Utc::now())
        .bind(username)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a user
///
/// # Returns
/// True if a user was deleted
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
