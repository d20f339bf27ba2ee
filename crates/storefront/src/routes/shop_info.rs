//! Public shop metadata.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::ShopInfoRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// The shop metadata, or `{}` before an admin has saved it.
///
/// GET /api/shop-info
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<Value>> {
    let Some(info) = ShopInfoRepository::new(state.pool()).get().await? else {
        return Ok(Json(json!({})));
    };
    serde_json::to_value(info)
        .map(Json)
        .map_err(|e| AppError::Internal(format!("serialize shop info: {e}")))
}
