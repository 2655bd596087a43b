/**
 * Router Configuration
 *
 * Combines all route groups into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (token, current user, user administration)
 * 2. Shop routes (products, baskets)
 * 3. Fallback handler (404)
 *
 * Every request is traced by `TraceLayer`.
 */

use axum::{http::StatusCode, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::shop_routes::configure_shop_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## API Routes
///
/// - `POST /token` - Login, returns a bearer token
/// - `GET /users/me` - Current user
/// - `POST /user`, `GET /user` - Register and list users
/// - `GET/PUT/DELETE /user/{id}` - User administration
///
/// ## Shop Routes
///
/// - `POST/GET /product`, `GET/PUT/DELETE /product/{id}`
/// - `POST/GET /basket`, `GET/PUT/DELETE /basket/{id}`
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_api_routes(router);
    let router = configure_shop_routes(router);

    router
        .fallback(|| async { BackendError::handler(StatusCode::NOT_FOUND, "Not Found") })
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}
