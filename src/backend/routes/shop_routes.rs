/**
 * Shop Routes
 *
 * The generic resource handlers instantiated for products and baskets. All
 * routes require a bearer token.
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::server::state::AppState;
use crate::backend::shop::{handlers, Resource};
use crate::shared::{Basket, Product};

/// Collection and item routes for one resource type
fn resource_routes<R: Resource>(router: Router<AppState>, base: &str) -> Router<AppState> {
    router
        .route(base, post(handlers::create::<R>).get(handlers::list::<R>))
        .route(
            &format!("{base}/{{id}}"),
            get(handlers::get::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>),
        )
}

/// Configure product and basket routes
pub fn configure_shop_routes(router: Router<AppState>) -> Router<AppState> {
    let router = resource_routes::<Product>(router, "/product");
    resource_routes::<Basket>(router, "/basket")
}
