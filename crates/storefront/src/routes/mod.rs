//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Database ping
//!
//! # Catalog
//! GET  /api/products           - Product listing (filters in the query string)
//! GET  /api/products/{id}      - Product detail
//! GET  /api/categories         - Category listing
//! GET  /api/shop-info          - Shop metadata or {}
//!
//! # Contact (rate limited)
//! POST /api/contact            - Submit a contact message
//!
//! # Cart (session)
//! GET  /api/cart               - Current cart
//! POST /api/cart/add           - Add one unit
//! POST /api/cart/update        - Set quantity
//! POST /api/cart/remove        - Remove a line
//! POST /api/cart/clear         - Empty the cart
//! ```

pub mod cart;
pub mod categories;
pub mod contact;
pub mod products;
pub mod shop_info;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, contact_rate_limiter};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::index))
        .route("/api/products/{id}", get(products::show))
        .route("/api/categories", get(categories::index))
        .route("/api/shop-info", get(shop_info::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    let writes = Router::new()
        .route("/api/cart/add", post(cart::add))
        .route("/api/cart/update", post(cart::update))
        .route("/api/cart/remove", post(cart::remove))
        .route("/api/cart/clear", post(cart::clear))
        .layer(api_rate_limiter());

    Router::new()
        .route("/api/cart", get(cart::show))
        .merge(writes)
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(contact::submit))
        .layer(contact_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(contact_routes())
        .merge(cart_routes())
}
