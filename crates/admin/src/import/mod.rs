//! Bulk product import from supplier spreadsheets.
//!
//! An upload is decoded into rows ([`reader`]), each row is mapped onto a
//! product ([`mapper`]) and written through a [`CatalogStore`]. Rows are
//! processed one at a time in file order. A bad row is counted and described
//! in the [`ImportReport`]; it never stops the rows after it.
//!
//! Only two things abort a run: an unreadable file and a failure to load the
//! existing categories before the first row.

pub mod columns;
pub mod mapper;
pub mod memory;
pub mod reader;

use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use larder_core::{CategoryRef, NewProduct, Product};

pub use mapper::{Cell, CategoryLookup, MappedRow, Row, RowRejection, map_row};
pub use memory::MemoryCatalogStore;
pub use reader::{DecodeError, SourceFormat, read_rows};

use crate::db::RepositoryError;

/// Errors reported by a [`CatalogStore`].
#[derive(Debug, Clone, Error)]
pub enum CatalogStoreError {
    /// The write conflicts with existing data.
    #[error("{0}")]
    Rejected(String),

    /// The store could not be reached or failed internally.
    #[error("{0}")]
    Unavailable(String),
}

impl From<RepositoryError> for CatalogStoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::Rejected(msg),
            RepositoryError::NotFound => Self::Rejected("not found".to_owned()),
            RepositoryError::DataCorruption(msg) => Self::Unavailable(msg),
            RepositoryError::Database(e) => Self::Unavailable(e.to_string()),
        }
    }
}

/// Where imported categories and products are written.
pub trait CatalogStore: Sync {
    /// Every existing category.
    fn list_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<CategoryRef>, CatalogStoreError>> + Send;

    /// Create a category, or return the existing one with the same
    /// case-insensitive name.
    fn create_category(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<CategoryRef, CatalogStoreError>> + Send;

    /// Insert a product with its final price derived from base price and GST.
    fn create_product(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Product, CatalogStoreError>> + Send;
}

/// Outcome of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success_count: usize,
    pub failure_count: usize,
    /// One entry per failed row, in row order.
    pub messages: Vec<String>,
}

impl ImportReport {
    /// Human-readable summary line.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Import completed: {} products added, {} failed",
            self.success_count, self.failure_count
        )
    }

    /// Rows processed in total.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    fn record_failure(&mut self, failure: &RowFailure) {
        self.failure_count += 1;
        self.messages.push(failure.to_string());
    }
}

/// Errors that abort a whole import run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("could not load categories: {0}")]
    Store(#[from] CatalogStoreError),
}

#[derive(Debug, Error)]
enum RowFailure {
    #[error("Row {row}: {rejection}")]
    Rejected { row: usize, rejection: RowRejection },

    #[error("Row {row} ({name}): {rejection}")]
    Invalid {
        row: usize,
        name: String,
        rejection: RowRejection,
    },

    #[error("Row {row} ({name}): category '{category}' could not be created: {source}")]
    Category {
        row: usize,
        name: String,
        category: String,
        source: CatalogStoreError,
    },

    #[error("{name}: {source}")]
    Product {
        name: String,
        source: CatalogStoreError,
    },
}

impl RowFailure {
    fn from_rejection(row: usize, rejection: RowRejection) -> Self {
        match &rejection {
            RowRejection::MissingName => Self::Rejected { row, rejection },
            RowRejection::Price { name, .. } => Self::Invalid {
                row,
                name: name.clone(),
                rejection,
            },
        }
    }
}

/// Import decoded rows in order.
///
/// # Errors
///
/// Returns [`CatalogStoreError`] only if the existing categories cannot be
/// listed. Every per-row problem is recorded in the report instead.
#[instrument(skip(store, rows), fields(rows = rows.len()))]
pub async fn import_rows<S: CatalogStore>(
    store: &S,
    rows: &[Row],
) -> Result<ImportReport, CatalogStoreError> {
    let mut lookup = CategoryLookup::seed(store.list_categories().await?);
    tracing::info!(categories = lookup.len(), "Import started");

    let mut report = ImportReport::default();
    for row in rows {
        match import_row(store, &mut lookup, row).await {
            Ok(product) => {
                report.success_count += 1;
                tracing::debug!(row = row.number, product_id = %product.id, "Row imported");
            }
            Err(failure) => {
                tracing::warn!(row = row.number, error = %failure, "Row failed");
                report.record_failure(&failure);
            }
        }
    }

    tracing::info!(
        success_count = report.success_count,
        failure_count = report.failure_count,
        "Import finished"
    );
    Ok(report)
}

/// Decode an upload and import its rows.
///
/// # Errors
///
/// Returns [`ImportError::Decode`] if the file cannot be read and
/// [`ImportError::Store`] if the existing categories cannot be listed.
pub async fn import_file<S: CatalogStore>(
    store: &S,
    bytes: &[u8],
    format: SourceFormat,
) -> Result<ImportReport, ImportError> {
    let rows = read_rows(bytes, format)?;
    Ok(import_rows(store, &rows).await?)
}

async fn import_row<S: CatalogStore>(
    store: &S,
    lookup: &mut CategoryLookup,
    row: &Row,
) -> Result<Product, RowFailure> {
    let MappedRow {
        category,
        mut product,
    } = map_row(row).map_err(|rejection| RowFailure::from_rejection(row.number, rejection))?;

    if let Some(category) = category {
        let category_id = match lookup.get(&category) {
            Some(id) => id,
            None => {
                let created = store.create_category(&category).await.map_err(|source| {
                    RowFailure::Category {
                        row: row.number,
                        name: product.name.clone(),
                        category: category.clone(),
                        source,
                    }
                })?;
                lookup.insert(&created);
                created.id
            }
        };
        product.category_id = Some(category_id);
    }

    store
        .create_product(&product)
        .await
        .map_err(|source| RowFailure::Product {
            name: product.name.clone(),
            source,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use larder_core::{CategoryId, StockStatus};

    use super::*;

    /// Store that fails on demand and records the order of calls.
    #[derive(Default)]
    struct ScriptedStore {
        inner: MemoryCatalogStore,
        fail_listing: bool,
        fail_categories: HashSet<String>,
        fail_products: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedStore {
        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CatalogStore for ScriptedStore {
        async fn list_categories(&self) -> Result<Vec<CategoryRef>, CatalogStoreError> {
            self.log("list".to_owned());
            if self.fail_listing {
                return Err(CatalogStoreError::Unavailable("connection refused".to_owned()));
            }
            self.inner.list_categories().await
        }

        async fn create_category(&self, name: &str) -> Result<CategoryRef, CatalogStoreError> {
            self.log(format!("category:{name}"));
            if self.fail_categories.contains(name) {
                return Err(CatalogStoreError::Unavailable("timeout".to_owned()));
            }
            self.inner.create_category(name).await
        }

        async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogStoreError> {
            self.log(format!("product:{}", product.name));
            if self.fail_products.contains(&product.name) {
                return Err(CatalogStoreError::Rejected(
                    "duplicate key value violates unique constraint".to_owned(),
                ));
            }
            self.inner.create_product(product).await
        }
    }

    fn row(number: usize, name: &str, category: &str, price: &str) -> Row {
        Row::new(number)
            .with("Product Name", name)
            .with("Category", category)
            .with("Base Price", price)
    }

    #[tokio::test]
    async fn test_import_reuses_categories_case_insensitively() {
        let store = ScriptedStore::default();
        let rows = vec![
            row(1, "Masala Peanuts", "Snacks", "40"),
            row(2, "Banana Chips", "snacks", "55"),
            row(3, "Bhujia", " SNACKS ", "60"),
        ];

        let report = import_rows(&store, &rows).await.unwrap();

        assert_eq!(report.success_count, 3);
        assert_eq!(report.failure_count, 0);
        assert!(report.messages.is_empty());

        let categories = store.inner.categories();
        assert_eq!(categories.len(), 1);
        let products = store.inner.products();
        assert!(products.iter().all(|p| p.category_id == Some(categories[0].id)));
    }

    #[tokio::test]
    async fn test_existing_category_is_not_recreated() {
        let store = ScriptedStore {
            inner: MemoryCatalogStore::with_categories(["Beverages"]),
            ..ScriptedStore::default()
        };
        let rows = vec![row(1, "Filter Coffee 500g", "beverages", "300")];

        let report = import_rows(&store, &rows).await.unwrap();

        assert_eq!(report.success_count, 1);
        assert_eq!(store.inner.categories().len(), 1);
        assert_eq!(store.calls(), vec!["list", "product:Filter Coffee 500g"]);
    }

    #[tokio::test]
    async fn test_missing_name_fails_row_without_side_effects() {
        let store = ScriptedStore::default();
        let rows = vec![
            row(1, "", "Pickles", "10"),
            row(2, "Mango Pickle", "Condiments", "90"),
        ];

        let report = import_rows(&store, &rows).await.unwrap();

        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.messages, vec!["Row 1: missing product name"]);
        assert!(!store.calls().contains(&"category:Pickles".to_owned()));
    }

    #[tokio::test]
    async fn test_product_failure_does_not_stop_later_rows() {
        let store = ScriptedStore {
            fail_products: HashSet::from(["Ghee 1L".to_owned()]),
            ..ScriptedStore::default()
        };
        let rows = vec![
            row(1, "Paneer 200g", "Dairy", "80"),
            row(2, "Ghee 1L", "Dairy", "650"),
            row(3, "Curd 400g", "Dairy", "45"),
            row(4, "Butter 100g", "Dairy", "56"),
        ];

        let report = import_rows(&store, &rows).await.unwrap();

        assert_eq!(report.success_count, 3);
        assert_eq!(report.failure_count, 1);
        assert_eq!(
            report.messages,
            vec!["Ghee 1L: duplicate key value violates unique constraint"]
        );
        let names: Vec<_> = store.inner.products().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Paneer 200g", "Curd 400g", "Butter 100g"]);
    }

    #[tokio::test]
    async fn test_category_failure_is_a_row_failure() {
        let store = ScriptedStore {
            fail_categories: HashSet::from(["Frozen".to_owned()]),
            ..ScriptedStore::default()
        };
        let rows = vec![
            row(1, "Frozen Peas", "Frozen", "70"),
            row(2, "Atta 10kg", "Flours", "420"),
        ];

        let report = import_rows(&store, &rows).await.unwrap();

        assert_eq!(report.success_count, 1);
        assert_eq!(
            report.messages,
            vec!["Row 1 (Frozen Peas): category 'Frozen' could not be created: timeout"]
        );
        assert!(!store.calls().contains(&"product:Frozen Peas".to_owned()));
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let store = ScriptedStore::default();
        let rows = vec![row(1, "Refund Adjustment", "", "-5")];

        let report = import_rows(&store, &rows).await.unwrap();

        assert_eq!(report.failure_count, 1);
        assert_eq!(
            report.messages,
            vec!["Row 1 (Refund Adjustment): base price must not be negative"]
        );
        assert!(store.inner.products().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_price_fails_one_row_in_every_store() {
        let csv = "Name,Price,GST\nBig,1e28,18\nSmall,10,0\nSteep,10,1000\n";
        let format = SourceFormat::Delimited { delimiter: b',' };
        let expected = vec![
            "Row 1 (Big): base price must not exceed 9999999999.99",
            "Row 3 (Steep): GST percentage must not exceed 999.99",
        ];

        let scripted = ScriptedStore::default();
        let report = import_file(&scripted, csv.as_bytes(), format).await.unwrap();
        assert_eq!((report.success_count, report.failure_count), (1, 2));
        assert_eq!(report.messages, expected);
        assert_eq!(scripted.calls(), vec!["list", "product:Small"]);

        let dry_run = MemoryCatalogStore::default();
        let report = import_file(&dry_run, csv.as_bytes(), format).await.unwrap();
        assert_eq!((report.success_count, report.failure_count), (1, 2));
        assert_eq!(report.messages, expected);
        let products = dry_run.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].final_price, Decimal::from(10));
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_run() {
        let store = ScriptedStore {
            fail_listing: true,
            ..ScriptedStore::default()
        };
        let rows = vec![row(1, "Salt", "Staples", "20")];

        let err = import_rows(&store, &rows).await.unwrap_err();

        assert!(matches!(err, CatalogStoreError::Unavailable(_)));
        assert_eq!(store.calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn test_rows_are_written_in_source_order() {
        let store = ScriptedStore::default();
        let rows = vec![
            row(1, "A", "X", "1"),
            row(2, "B", "Y", "1"),
            row(3, "C", "x", "1"),
        ];

        import_rows(&store, &rows).await.unwrap();

        assert_eq!(
            store.calls(),
            vec![
                "list",
                "category:X",
                "product:A",
                "category:Y",
                "product:B",
                "product:C"
            ]
        );
    }

    #[tokio::test]
    async fn test_counts_always_cover_every_row() {
        for failing in 0..5 {
            let names: Vec<String> = (0..5).map(|i| format!("Item {i}")).collect();
            let store = ScriptedStore {
                fail_products: HashSet::from([names[failing].clone()]),
                ..ScriptedStore::default()
            };
            let mut rows: Vec<Row> = names
                .iter()
                .enumerate()
                .map(|(i, name)| row(i + 1, name, "Misc", "10"))
                .collect();
            rows.push(row(6, "", "Misc", "10"));

            let report = import_rows(&store, &rows).await.unwrap();

            assert_eq!(report.total(), rows.len());
            assert_eq!(report.success_count, 4);
            assert_eq!(report.failure_count, 2);
            assert_eq!(report.messages.len(), report.failure_count);
        }
    }

    #[tokio::test]
    async fn test_rerun_does_not_duplicate_categories() {
        let store = MemoryCatalogStore::default();
        let rows = vec![row(1, "Rock Salt", "Spices", "25")];

        import_rows(&store, &rows).await.unwrap();
        import_rows(&store, &rows).await.unwrap();

        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.products().len(), 2);
    }

    #[tokio::test]
    async fn test_import_file_stores_derived_final_price() {
        let store = MemoryCatalogStore::default();
        let csv = "Code,Name,Category,Price,GST,Stock\nA-1,Basmati 5kg,Rice,100,18,IN\nA-2,Sona 5kg,Rice,200,5,out\n";

        let report = import_file(
            &store,
            csv.as_bytes(),
            SourceFormat::Delimited { delimiter: b',' },
        )
        .await
        .unwrap();

        assert_eq!(report.summary(), "Import completed: 2 products added, 0 failed");
        let products = store.products();
        assert_eq!(products[0].final_price, Decimal::from(118));
        assert_eq!(products[1].final_price, Decimal::from(210));
        assert_eq!(products[1].stock_status, StockStatus::Out);
        assert_eq!(products[0].product_code.as_deref(), Some("A-1"));
        assert_eq!(products[0].category_id, Some(CategoryId::new(1)));
    }

    #[tokio::test]
    async fn test_import_file_decode_error_is_fatal() {
        let store = MemoryCatalogStore::default();

        let err = import_file(&store, b"PK\x03\x04broken", SourceFormat::Workbook)
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::Decode(_)));
        assert!(store.products().is_empty());
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = ImportReport {
            success_count: 2,
            failure_count: 1,
            messages: vec!["Row 3: missing product name".to_owned()],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["successCount"], 2);
        assert_eq!(json["failureCount"], 1);
        assert_eq!(json["messages"][0], "Row 3: missing product name");
    }
}
