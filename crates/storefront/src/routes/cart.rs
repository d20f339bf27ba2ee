//! Session cart endpoints.
//!
//! The cart lives in the visitor's session under
//! [`session_keys::CART`]; every write reads it, changes it and stores it
//! back before responding.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use larder_core::{ProductId, StockStatus};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::{Cart, CartView, session_keys};
use crate::state::AppState;

/// Body for add and remove.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub product_id: ProductId,
}

/// Body for update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuantity {
    pub product_id: ProductId,
    pub quantity: i64,
}

async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

async fn save_cart(session: &Session, cart: Cart) -> Result<Json<CartView>> {
    session.insert(session_keys::CART, &cart).await?;
    Ok(Json(cart.into()))
}

/// Current cart.
///
/// GET /api/cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    Ok(Json(load_cart(&session).await?.into()))
}

/// Add one unit of a product.
///
/// POST /api/cart/add
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CartProduct>,
) -> Result<Json<CartView>> {
    let product = CatalogRepository::new(state.pool())
        .get_product(body.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    if product.stock_status == StockStatus::Out {
        return Err(AppError::Conflict(format!("{} is out of stock", product.name)));
    }

    let mut cart = load_cart(&session).await?;
    cart.add(&product);
    save_cart(&session, cart).await
}

/// Set a line's quantity. Quantities below one are ignored.
///
/// POST /api/cart/update
#[instrument(skip(session))]
pub async fn update(session: Session, Json(body): Json<CartQuantity>) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    if !cart.update(body.product_id, body.quantity) {
        return Ok(Json(cart.into()));
    }
    save_cart(&session, cart).await
}

/// Drop a line.
///
/// POST /api/cart/remove
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(body): Json<CartProduct>) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(body.product_id);
    save_cart(&session, cart).await
}

/// Empty the cart.
///
/// POST /api/cart/clear
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    session.remove::<Cart>(session_keys::CART).await?;
    Ok(Json(Cart::default().into()))
}
