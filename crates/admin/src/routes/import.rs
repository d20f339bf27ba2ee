//! Bulk product import endpoint.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use serde::Serialize;
use tracing::instrument;

use crate::db::PgCatalogStore;
use crate::error::AppError;
use crate::import::{ImportReport, SourceFormat, import_file};
use crate::middleware::RequireEditor;
use crate::state::AppState;

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

/// Build the import router with the given upload limit.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/products/import", post(import_products))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Import response body.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: ImportReport,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        Self {
            message: report.summary(),
            report,
        }
    }
}

/// Import products from an uploaded spreadsheet or delimited text file.
///
/// # Errors
///
/// Returns 400 if no file was uploaded, 422 if it cannot be decoded and 503
/// if the existing categories cannot be loaded.
#[instrument(skip(admin, state, multipart), fields(admin_id = %admin.id))]
pub async fn import_products(
    RequireEditor(admin): RequireEditor,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?
    {
        if field.name() == Some(FILE_FIELD) {
            let file_name = field.file_name().map(ToOwned::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
            upload = Some((file_name, bytes));
            break;
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_owned()))?;
    let format = SourceFormat::detect(file_name.as_deref(), &bytes);
    tracing::info!(
        file_name = file_name.as_deref().unwrap_or("<unnamed>"),
        size = bytes.len(),
        ?format,
        "Import upload received"
    );

    let report = import_file(&PgCatalogStore::new(state.pool()), &bytes, format).await?;
    Ok(Json(report.into()))
}
