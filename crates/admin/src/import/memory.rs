//! In-memory catalog store.
//!
//! Used for dry runs (`larder import --dry-run`), where a file is checked
//! against the current categories without writing anything.

use std::sync::Mutex;

use chrono::Utc;

use larder_core::{CategoryId, CategoryRef, NewProduct, Product, ProductId};

use super::{CatalogStore, CatalogStoreError};

/// A [`CatalogStore`] that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    categories: Vec<CategoryRef>,
    products: Vec<Product>,
}

impl MemoryCatalogStore {
    /// Start from existing categories, numbered from 1 in the order given.
    #[must_use]
    pub fn with_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories = names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| CategoryRef {
                id: CategoryId::new(id),
                name: name.into(),
            })
            .collect();
        Self::from_refs(categories)
    }

    /// Start from existing categories with their ids.
    #[must_use]
    pub fn from_refs(categories: Vec<CategoryRef>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                categories,
                products: Vec::new(),
            }),
        }
    }

    /// Snapshot of the categories.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryRef> {
        self.lock().categories.clone()
    }

    /// Snapshot of the products, in insertion order.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

fn next_id(len: usize) -> Result<i32, CatalogStoreError> {
    i32::try_from(len + 1).map_err(|_| CatalogStoreError::Unavailable("id space exhausted".to_owned()))
}

impl CatalogStore for MemoryCatalogStore {
    async fn list_categories(&self) -> Result<Vec<CategoryRef>, CatalogStoreError> {
        Ok(self.categories())
    }

    async fn create_category(&self, name: &str) -> Result<CategoryRef, CatalogStoreError> {
        let name = name.trim();
        let mut state = self.lock();
        if let Some(existing) = state
            .categories
            .iter()
            .find(|c| c.name.to_lowercase() == name.to_lowercase())
        {
            return Ok(existing.clone());
        }

        let id = state
            .categories
            .iter()
            .map(|c| c.id.as_i32())
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| CatalogStoreError::Unavailable("id space exhausted".to_owned()))?;
        let category = CategoryRef {
            id: CategoryId::new(id),
            name: name.to_owned(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogStoreError> {
        let mut state = self.lock();
        let id = next_id(state.products.len())?;
        let now = Utc::now();
        let stored = Product {
            id: ProductId::new(id),
            product_code: product.product_code.clone(),
            name: product.name.clone(),
            brand_name: product.brand_name.clone(),
            company_name: product.company_name.clone(),
            category_id: product.category_id,
            case_size: product.case_size.clone(),
            pack_size: product.pack_size.clone(),
            shelf_life: product.shelf_life.clone(),
            base_price: product.base_price,
            gst_percentage: product.gst_percentage,
            final_price: product.final_price(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            stock_status: product.stock_status,
            is_featured: product.is_featured,
            created_at: now,
            updated_at: now,
            category: None,
        };
        state.products.push(stored.clone());
        Ok(stored)
    }
}
