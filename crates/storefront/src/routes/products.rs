//! Public product listing and detail.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use larder_core::{Product, ProductFilter, ProductId};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List products, newest first.
///
/// GET /api/products?category=&search=&stock=&brand=&minPrice=&maxPrice=&featured=&limit=
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>> {
    let products = CatalogRepository::new(state.pool())
        .list_products(&filter)
        .await?;
    Ok(Json(products))
}

/// Product detail with its category embedded.
///
/// GET /api/products/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    CatalogRepository::new(state.pool())
        .get_product(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}
