/**
 * Server Initialization
 *
 * Builds the Axum application from a `ServerConfig`:
 * 1. Connect to the database and run migrations
 * 2. Build the token service from the auth settings
 * 3. Create the router with all routes
 *
 * A database failure is fatal; the server does not start without one.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns the database error if the pool cannot be opened or migrations fail.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing storefront backend server");

    let db_pool = connect_database(&config.database_url).await?;
    let app_state = AppState::new(db_pool, &config.auth);

    tracing::info!(
        "Token service ready ({:?}, default lifetime {} minutes)",
        config.auth.jwt_algorithm,
        config.auth.access_token_ttl.num_minutes()
    );

    Ok(create_router(app_state))
}
