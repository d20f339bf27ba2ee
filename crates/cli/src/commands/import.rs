//! Offline catalog import.
//!
//! ```bash
//! larder import price-list.xlsx
//! larder import price-list.csv --dry-run
//! ```
//!
//! Runs the same pipeline as `POST /api/products/import` and prints the
//! report as JSON. With `--dry-run` the rows are mapped against the
//! database's current categories but written to an in-memory store, so
//! nothing is persisted.

use std::path::Path;

use larder_admin::db::{CategoryRepository, PgCatalogStore};
use larder_admin::import::{ImportReport, MemoryCatalogStore, SourceFormat, import_file};

use super::{CliError, connect};

/// Import a spreadsheet or delimited file and print the report.
///
/// # Errors
///
/// Returns `CliError` if the file cannot be read or decoded, or the
/// existing categories cannot be loaded.
pub async fn run(path: &Path, dry_run: bool) -> Result<(), CliError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path.file_name().and_then(|name| name.to_str());
    let format = SourceFormat::detect(file_name, &bytes);

    let pool = connect().await?;
    let report = if dry_run {
        let categories = CategoryRepository::new(&pool).list_refs().await?;
        let store = MemoryCatalogStore::from_refs(categories);
        import_file(&store, &bytes, format).await?
    } else {
        import_file(&PgCatalogStore::new(&pool), &bytes, format).await?
    };

    tracing::info!(dry_run, "{}", report.summary());
    print_report(&report)
}

#[allow(clippy::print_stdout)]
fn print_report(report: &ImportReport) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
