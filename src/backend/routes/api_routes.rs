/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /token` - Login with form fields `username` and `password`
 * - `GET /users/me` - Current user (requires authentication)
 *
 * ## Users
 * - `POST /user` - Register (public)
 * - `GET /user` - List users (public)
 * - `GET /user/{id}` - Fetch a user (requires authentication)
 * - `PUT /user/{id}` - Update a user (requires authentication)
 * - `DELETE /user/{id}` - Delete a user (requires authentication)
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::users::{delete_user, get_user, list_users, update_user};
use crate::backend::auth::{get_me, login, register_user};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Protected handlers take a `CurrentPrincipal` argument, so the guard is
/// part of each handler's signature rather than a layer.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/token", post(login))
        .route("/users/me", get(get_me))
        .route("/user", post(register_user).get(list_users))
        .route(
            "/user/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
