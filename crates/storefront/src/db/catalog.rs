//! Public catalog reads: products with their category, and categories.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use larder_core::{Category, CategoryId, Product, ProductFilter, ProductId, StockStatus};

use super::RepositoryError;

const SELECT_PRODUCTS: &str = "\
    SELECT p.id, p.product_code, p.name, p.brand_name, p.company_name, p.category_id, \
           p.case_size, p.pack_size, p.shelf_life, p.base_price, p.gst_percentage, \
           p.final_price, p.description, p.image_url, p.stock_status, p.is_featured, \
           p.created_at, p.updated_at, \
           c.name AS category_name, c.description AS category_description, \
           c.created_at AS category_created_at, c.updated_at AS category_updated_at \
    FROM products p LEFT JOIN categories c ON c.id = p.category_id";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    product_code: Option<String>,
    name: String,
    brand_name: Option<String>,
    company_name: Option<String>,
    category_id: Option<i32>,
    case_size: Option<String>,
    pack_size: Option<String>,
    shelf_life: Option<String>,
    base_price: Decimal,
    gst_percentage: Decimal,
    final_price: Decimal,
    description: Option<String>,
    image_url: Option<String>,
    stock_status: StockStatus,
    is_featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: Option<String>,
    category_description: Option<String>,
    category_created_at: Option<DateTime<Utc>>,
    category_updated_at: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let category = row.category_id.zip(row.category_name).and_then(|(id, name)| {
            Some(Category {
                id: CategoryId::new(id),
                name,
                description: row.category_description,
                created_at: row.category_created_at?,
                updated_at: row.category_updated_at?,
            })
        });

        Self {
            id: ProductId::new(row.id),
            product_code: row.product_code,
            name: row.name,
            brand_name: row.brand_name,
            company_name: row.company_name,
            category_id: row.category_id.map(CategoryId::new),
            case_size: row.case_size,
            pack_size: row.pack_size,
            shelf_life: row.shelf_life,
            base_price: row.base_price,
            gst_percentage: row.gst_percentage,
            final_price: row.final_price,
            description: row.description,
            image_url: row.image_url,
            stock_status: row.stock_status,
            is_featured: row.is_featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
            category,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS);
        query.push(" WHERE TRUE");

        if let Some(category) = filter.category {
            query.push(" AND p.category_id = ").push_bind(category.as_i32());
        }
        if let Some(pattern) = filter.search_pattern() {
            query
                .push(" AND (p.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR p.brand_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR p.product_code ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(stock) = filter.stock {
            query.push(" AND p.stock_status = ").push_bind(stock);
        }
        if let Some(pattern) = filter.brand_pattern() {
            query.push(" AND p.brand_name ILIKE ").push_bind(pattern);
        }
        if let Some(min) = filter.min_price {
            query.push(" AND p.final_price >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price {
            query.push(" AND p.final_price <= ").push_bind(max);
        }
        if filter.featured_only() {
            query.push(" AND p.is_featured");
        }

        query
            .push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(filter.effective_limit());

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS);
        query.push(" WHERE p.id = ").push_bind(id.as_i32());

        let row = query
            .build_query_as::<ProductRow>()
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List all categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
