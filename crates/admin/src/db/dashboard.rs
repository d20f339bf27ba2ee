//! Dashboard summary.

use serde::Serialize;
use sqlx::PgPool;

use larder_core::{Product, ProductFilter};

use super::{CategoryRepository, ContactRepository, ProductRepository, RepositoryError};

const RECENT_PRODUCTS: i64 = 5;

/// Catalog and inbox totals shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub in_stock_products: i64,
    pub out_of_stock_products: i64,
    pub categories_count: i64,
    pub recent_products: Vec<Product>,
    pub unread_messages: i64,
}

/// Aggregates counts across the catalog tables.
pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Collect the dashboard figures.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any of the underlying queries fail.
    pub async fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        let stock = ProductRepository::new(self.pool).stock_counts().await?;
        let recent_products = ProductRepository::new(self.pool)
            .list(&ProductFilter {
                limit: Some(RECENT_PRODUCTS),
                ..ProductFilter::default()
            })
            .await?;
        let categories_count = CategoryRepository::new(self.pool).count().await?;
        let unread_messages = ContactRepository::new(self.pool).count_unread().await?;

        Ok(DashboardStats {
            total_products: stock.total,
            in_stock_products: stock.in_stock,
            out_of_stock_products: stock.out_of_stock,
            categories_count,
            recent_products,
            unread_messages,
        })
    }
}
