/**
 * Signup Handler
 *
 * POST /user creates a user account. The plaintext password is bcrypt-hashed
 * before storage and never echoed back. A taken username answers 409.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{RegisterUserRequest, UserResponse};
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{create_user, Principal};
use crate::backend::error::BackendError;
use crate::shared::ApiResponse;

/// Whether a database error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Register a new user
///
/// # Errors
///
/// * `400 Bad Request` - password longer than 71 bytes
/// * `409 Conflict` - username already taken
/// * `500 Internal Server Error` - hashing or database failure
pub async fn register_user(
    State(pool): State<SqlitePool>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, BackendError> {
    tracing::info!("Signup request for username: {}", request.username);

    let password_hash = hash_password(&request.password).await?;

    let user = Principal::new(request.username, password_hash)
        .with_name(request.first_name, request.last_name)
        .with_email(request.email)
        .with_national_id(request.national_id);

    let user = create_user(&pool, &user).await.map_err(|e| {
        if is_unique_violation(&e) {
            tracing::warn!("Username already exists: {}", user.username);
            BackendError::Conflict("Username already taken".to_string())
        } else {
            e.into()
        }
    })?;

    tracing::info!("User created successfully: {}", user.username);

    Ok(Json(ApiResponse::ok(
        UserResponse::from(user),
        "user added successfully.",
    )))
}
