//! Product management endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use larder_core::{NewProduct, Product, ProductFilter, ProductId, ProductInput};

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route("/api/products/{id}", get(show).put(update).delete(delete))
}

/// Filtered product listing, newest first.
///
/// # Errors
///
/// Returns 500 if the database query fails.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// A single product with its category.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Create a product. The final price is derived, never accepted.
///
/// # Errors
///
/// Returns 400 for a blank name or a negative or oversized price and 409 for
/// an unknown category.
#[instrument(skip(admin, state, body), fields(admin_id = %admin.id))]
pub async fn create(
    RequireEditor(admin): RequireEditor,
    State(state): State<AppState>,
    Json(body): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = validated(body)?;
    let product = ProductRepository::new(state.pool()).create(&product).await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's fields, re-deriving the final price.
///
/// # Errors
///
/// Returns 400 for invalid input and 404 if the product does not exist.
#[instrument(skip(admin, state, body), fields(admin_id = %admin.id))]
pub async fn update(
    RequireEditor(admin): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductInput>,
) -> Result<Json<Product>, AppError> {
    let product = validated(body)?;
    let product = ProductRepository::new(state.pool())
        .update(id, &product)
        .await?;
    Ok(Json(product))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete(
    RequireEditor(admin): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, AppError> {
    ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn validated(body: ProductInput) -> Result<NewProduct, AppError> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::response::IntoResponse;
    use rust_decimal::Decimal;

    use super::*;

    fn input(json: &str) -> ProductInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_oversized_price_is_bad_request() {
        let err = validated(input(r#"{"name":"Saffron","base_price":"100000000000"}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "base price must not exceed 9999999999.99");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = validated(input(r#"{"name":"Saffron","base_price":"1","gst_percentage":"1000"}"#))
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_valid_input_is_stored_at_column_scale() {
        let product =
            validated(input(r#"{"name":"Poha 1kg","base_price":"10.005","gst_percentage":"18"}"#))
                .unwrap();
        assert_eq!(product.base_price, Decimal::new(1001, 2));
        assert_eq!(product.final_price(), Decimal::new(118_118, 4));
    }
}
