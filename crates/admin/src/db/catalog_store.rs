//! `PostgreSQL` implementation of the import pipeline's catalog store.

use sqlx::PgPool;

use larder_core::{CategoryRef, NewProduct, Product};

use super::{CategoryRepository, ProductRepository};
use crate::import::{CatalogStore, CatalogStoreError};

/// Writes imported rows straight to the catalog tables.
///
/// Each call runs on its own; a run is not wrapped in a transaction.
pub struct PgCatalogStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgCatalogStore<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgCatalogStore<'_> {
    async fn list_categories(&self) -> Result<Vec<CategoryRef>, CatalogStoreError> {
        Ok(CategoryRepository::new(self.pool).list_refs().await?)
    }

    async fn create_category(&self, name: &str) -> Result<CategoryRef, CatalogStoreError> {
        Ok(CategoryRepository::new(self.pool)
            .find_or_create(name.trim())
            .await?)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogStoreError> {
        Ok(ProductRepository::new(self.pool).create(product).await?)
    }
}
