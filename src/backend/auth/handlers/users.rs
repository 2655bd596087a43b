/**
 * User Handlers
 *
 * - GET /user         - list users (public)
 * - GET /user/{id}    - fetch a user
 * - PUT /user/{id}    - partial update; a new password is re-hashed and the
 *                       username cannot change
 * - DELETE /user/{id} - delete a user
 *
 * Responses carry `UserResponse`, never the password hash. Ids that do not
 * parse as UUIDs are treated like unknown ids.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::{UpdateUserRequest, UserResponse};
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{self, UserChanges};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::CurrentPrincipal;
use crate::shared::ApiResponse;

/// GET /user
pub async fn list_users(
    State(pool): State<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, BackendError> {
    let users: Vec<UserResponse> = users::list_users(&pool)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    let message = if users.is_empty() {
        "Empty list returned"
    } else {
        "users data retrieved successfully"
    };
    Ok(Json(ApiResponse::ok(users, message)))
}

/// GET /user/{id}
pub async fn get_user(
    CurrentPrincipal(_): CurrentPrincipal,
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, BackendError> {
    let user = match Uuid::parse_str(&id) {
        Ok(id) => users::get_user_by_id(&pool, id).await?,
        Err(_) => None,
    };

    match user {
        Some(user) => Ok(Json(ApiResponse::ok(
            UserResponse::from(user),
            "user data retrieved successfully",
        ))),
        None => Err(BackendError::not_found("An error occurred.", "user doesn't exist.")),
    }
}

/// PUT /user/{id}
///
/// # Errors
///
/// * `400 Bad Request` - body names a username, or the password is over 71 bytes
/// * `404 Not Found` - empty body or unknown id
pub async fn update_user(
    CurrentPrincipal(current): CurrentPrincipal,
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<String>>, BackendError> {
    let update_failed = || {
        BackendError::not_found("An error occurred", "There was an error updating the user data.")
    };

    let Ok(user_id) = Uuid::parse_str(&id) else {
        return Err(update_failed());
    };
    if request.username.is_some() {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "username cannot be changed",
        ));
    }

    let password_hash = match request.password {
        Some(password) => Some(hash_password(&password).await?),
        None => None,
    };
    let changes = UserChanges {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        national_id: request.national_id,
        password_hash,
    };
    if changes.is_empty() {
        return Err(update_failed());
    }

    let updated = users::update_user(&pool, user_id, changes).await?;
    if updated.is_none() {
        return Err(update_failed());
    }

    tracing::info!("User {} updated by {}", id, current.username);

    Ok(Json(ApiResponse::ok(
        format!("user with ID: {} name update is successful", id),
        "user name updated successfully",
    )))
}

/// DELETE /user/{id}
pub async fn delete_user(
    CurrentPrincipal(current): CurrentPrincipal,
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, BackendError> {
    let deleted = match Uuid::parse_str(&id) {
        Ok(user_id) => users::delete_user(&pool, user_id).await?,
        Err(_) => false,
    };
    if !deleted {
        return Err(BackendError::not_found(
            "An error occurred",
            format!("user with id {} doesn't exist", id),
        ));
    }

    tracing::info!("User {} deleted by {}", id, current.username);

    Ok(Json(ApiResponse::ok(
        format!("user with ID: {} removed", id),
        "user deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::password::verify_password;
    use crate::backend::auth::users::{create_user, get_user_by_id, Principal};
    use crate::backend::server::config::connect_database;
    use assert_matches::assert_matches;

    async fn setup() -> (SqlitePool, Principal) {
        let pool = connect_database("sqlite::memory:").await.unwrap();
        let user = create_user(&pool, &Principal::new("johndoe", "$2b$04$hash").with_email("johndoe@example.com"))
            .await
            .unwrap();
        (pool, user)
    }

    fn current(user: &Principal) -> CurrentPrincipal {
        CurrentPrincipal(user.clone())
    }

    #[tokio::test]
    async fn test_list_users() {
        let (pool, user) = setup().await;
        let Json(response) = list_users(State(pool)).await.unwrap();
        assert_eq!(response.message, "users data retrieved successfully");
        assert_eq!(response.data[0][0].id, user.id);
    }

    #[tokio::test]
    async fn test_get_user_unknown_or_malformed_id() {
        let (pool, user) = setup().await;
        let result = get_user(current(&user), State(pool.clone()), Path(Uuid::new_v4().to_string())).await;
        assert_matches!(result, Err(BackendError::NotFound { .. }));

        let result = get_user(current(&user), State(pool), Path("not-a-uuid".to_string())).await;
        assert_matches!(result, Err(BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let (pool, user) = setup().await;
        let request = UpdateUserRequest {
            password: Some("new-password".to_string()),
            ..Default::default()
        };
        update_user(current(&user), State(pool.clone()), Path(user.id.to_string()), Json(request))
            .await
            .unwrap();

        let stored = get_user_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "new-password");
        assert!(verify_password("new-password", &stored.password_hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_username_change_is_rejected() {
        let (pool, user) = setup().await;
        let request = UpdateUserRequest {
            username: Some("carol".to_string()),
            first_name: Some("Carol".to_string()),
            ..Default::default()
        };
        let result = update_user(current(&user), State(pool.clone()), Path(user.id.to_string()), Json(request)).await;
        assert_matches!(
            result,
            Err(BackendError::HandlerError { status, .. }) if status == StatusCode::BAD_REQUEST
        );

        let stored = get_user_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(stored.username, "johndoe");
        assert_eq!(stored.first_name, None);
    }

    #[tokio::test]
    async fn test_overlong_password_is_bad_request() {
        let (pool, user) = setup().await;
        let request = UpdateUserRequest {
            password: Some("x".repeat(73)),
            ..Default::default()
        };
        let result = update_user(current(&user), State(pool.clone()), Path(user.id.to_string()), Json(request)).await;
        assert_matches!(
            result,
            Err(BackendError::HandlerError { status, .. }) if status == StatusCode::BAD_REQUEST
        );

        let stored = get_user_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "$2b$04$hash");
    }

    #[tokio::test]
    async fn test_empty_update_is_not_found() {
        let (pool, user) = setup().await;
        let result = update_user(
            current(&user),
            State(pool),
            Path(user.id.to_string()),
            Json(UpdateUserRequest::default()),
        )
        .await;
        assert_matches!(
            result,
            Err(BackendError::NotFound { message, .. }) if message == "There was an error updating the user data."
        );
    }

    #[tokio::test]
    async fn test_delete_user() {
        let (pool, user) = setup().await;
        let Json(response) = delete_user(current(&user), State(pool.clone()), Path(user.id.to_string()))
            .await
            .unwrap();
        assert_eq!(response.message, "user deleted successfully");

        let result = delete_user(current(&user), State(pool), Path(user.id.to_string())).await;
        assert_matches!(result, Err(BackendError::NotFound { .. }));
    }
}
