//! Category management endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use larder_core::{Category, CategoryId, non_blank};

use crate::db::{CategoryRepository, RepositoryError};
use crate::error::AppError;
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list).post(create))
        .route("/api/categories/{id}", put(update).delete(delete))
}

/// Body for creating or updating a category.
#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryInput {
    fn validate(self) -> Result<(String, Option<String>), AppError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::BadRequest("Category name is required".to_owned()));
        }
        Ok((name, non_blank(self.description)))
    }
}

/// All categories ordered by name.
///
/// # Errors
///
/// Returns 500 if the database query fails.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list_all().await?;
    Ok(Json(categories))
}

/// Create a category.
///
/// # Errors
///
/// Returns 400 for a blank name and 409 if the name is already used.
#[instrument(skip(admin, state, body), fields(admin_id = %admin.id))]
pub async fn create(
    RequireEditor(admin): RequireEditor,
    State(state): State<AppState>,
    Json(body): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let (name, description) = body.validate()?;
    let category = CategoryRepository::new(state.pool())
        .create(&name, description.as_deref())
        .await?;

    tracing::info!(category_id = %category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Rename or re-describe a category.
///
/// # Errors
///
/// Returns 400 for a blank name, 404 if missing, 409 if the name is taken.
#[instrument(skip(admin, state, body), fields(admin_id = %admin.id))]
pub async fn update(
    RequireEditor(admin): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(body): Json<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    let (name, description) = body.validate()?;
    let category = CategoryRepository::new(state.pool())
        .update(id, &name, description.as_deref())
        .await?;
    Ok(Json(category))
}

/// Delete a category that no product references.
///
/// # Errors
///
/// Returns 400 if products still use the category and 404 if it is missing.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete(
    RequireEditor(admin): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<serde_json::Value>, AppError> {
    CategoryRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => other.into(),
        })?;

    tracing::info!(category_id = %id, "Category deleted");
    Ok(Json(serde_json::json!({ "success": true })))
}
