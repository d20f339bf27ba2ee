//! Shop metadata endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};
use tracing::instrument;

use larder_core::{ShopInfo, ShopInfoInput};

use crate::db::ShopInfoRepository;
use crate::error::AppError;
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;

/// Build the shop info router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/shop-info", get(show).put(upsert))
}

/// The shop metadata, or `{}` before it has been set.
///
/// # Errors
///
/// Returns 500 if the database query fails.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let info = ShopInfoRepository::new(state.pool()).get().await?;
    let body = match info {
        Some(info) => serde_json::to_value(info)
            .map_err(|e| AppError::Internal(format!("serialize shop info: {e}")))?,
        None => json!({}),
    };
    Ok(Json(body))
}

/// Create or replace the shop metadata.
///
/// # Errors
///
/// Returns 400 if the shop name is blank.
#[instrument(skip(admin, state, body), fields(admin_id = %admin.id))]
pub async fn upsert(
    RequireEditor(admin): RequireEditor,
    State(state): State<AppState>,
    Json(body): Json<ShopInfoInput>,
) -> Result<Json<ShopInfo>, AppError> {
    let input = body
        .normalized()
        .ok_or_else(|| AppError::BadRequest("Shop name is required".to_owned()))?;
    let info = ShopInfoRepository::new(state.pool()).upsert(&input).await?;
    Ok(Json(info))
}
