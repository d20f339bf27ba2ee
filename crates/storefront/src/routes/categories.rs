//! Public category listing.

use axum::{Json, extract::State};
use tracing::instrument;

use larder_core::Category;

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::state::AppState;

/// All categories ordered by name.
///
/// GET /api/categories
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CatalogRepository::new(state.pool())
        .list_categories()
        .await?;
    Ok(Json(categories))
}
