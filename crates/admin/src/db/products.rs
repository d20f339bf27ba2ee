//! Product repository.
//!
//! Every read joins the product's category so responses can embed it.
//! The stored `final_price` is always written from
//! [`NewProduct::final_price`]; no query accepts it from callers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use larder_core::{Category, CategoryId, NewProduct, Product, ProductFilter, ProductId, StockStatus};

use super::{RepositoryError, conflict_on_violation};

macro_rules! product_columns {
    () => {
        "p.id, p.product_code, p.name, p.brand_name, p.company_name, p.category_id, \
         p.case_size, p.pack_size, p.shelf_life, p.base_price, p.gst_percentage, \
         p.final_price, p.description, p.image_url, p.stock_status, p.is_featured, \
         p.created_at, p.updated_at, \
         c.name AS category_name, c.description AS category_description, \
         c.created_at AS category_created_at, c.updated_at AS category_updated_at"
    };
}

const SELECT_PRODUCTS: &str = concat!(
    "SELECT ",
    product_columns!(),
    " FROM products p LEFT JOIN categories c ON c.id = p.category_id"
);

const INSERT_PRODUCT: &str = concat!(
    "WITH p AS (
        INSERT INTO products (
            product_code, name, brand_name, company_name, category_id,
            case_size, pack_size, shelf_life, base_price, gst_percentage,
            final_price, description, image_url, stock_status, is_featured
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
    ) SELECT ",
    product_columns!(),
    " FROM p LEFT JOIN categories c ON c.id = p.category_id"
);

const UPDATE_PRODUCT: &str = concat!(
    "WITH p AS (
        UPDATE products SET
            product_code = $1, name = $2, brand_name = $3, company_name = $4,
            category_id = $5, case_size = $6, pack_size = $7, shelf_life = $8,
            base_price = $9, gst_percentage = $10, final_price = $11,
            description = $12, image_url = $13, stock_status = $14,
            is_featured = $15, updated_at = NOW()
        WHERE id = $16
        RETURNING *
    ) SELECT ",
    product_columns!(),
    " FROM p LEFT JOIN categories c ON c.id = p.category_id"
);

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
        let category = match (
            row.category_id,
            row.category_name,
            row.category_created_at,
            row.category_updated_at,
        ) {
            (Some(id), Some(name), Some(created_at), Some(updated_at)) => Some(Category {
                id: CategoryId::new(id),
                name,
                description: row.category_description,
                created_at,
                updated_at,
            }),
            _ => None,
        };

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

/// Stock totals for the dashboard.
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct StockCounts {
    pub total: i64,
    pub in_stock: i64,
    pub out_of_stock: i64,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
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
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products p LEFT JOIN categories c ON c.id = p.category_id WHERE p.id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the category does not exist.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let row = bind_product(sqlx::query_as::<_, ProductRow>(INSERT_PRODUCT), product)
            .fetch_one(self.pool)
            .await
            .map_err(|e| conflict_on_violation(e, "category does not exist"))?;

        Ok(row.into())
    }

    /// Replace every editable field of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Conflict` if the category does not exist.
    pub async fn update(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let row = bind_product(sqlx::query_as::<_, ProductRow>(UPDATE_PRODUCT), product)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await
            .map_err(|e| conflict_on_violation(e, "category does not exist"))?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Count products by stock status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stock_counts(&self) -> Result<StockCounts, RepositoryError> {
        let counts = sqlx::query_as::<_, StockCounts>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE stock_status = 'IN') AS in_stock,
                   COUNT(*) FILTER (WHERE stock_status = 'OUT') AS out_of_stock
            FROM products
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }
}

type ProductQuery<'q> =
    sqlx::query::QueryAs<'q, Postgres, ProductRow, sqlx::postgres::PgArguments>;

/// Bind the fifteen product columns in table order.
fn bind_product<'q>(query: ProductQuery<'q>, product: &'q NewProduct) -> ProductQuery<'q> {
    query
        .bind(product.product_code.as_deref())
        .bind(product.name.as_str())
        .bind(product.brand_name.as_deref())
        .bind(product.company_name.as_deref())
        .bind(product.category_id.map(|id| id.as_i32()))
        .bind(product.case_size.as_deref())
        .bind(product.pack_size.as_deref())
        .bind(product.shelf_life.as_deref())
        .bind(product.base_price)
        .bind(product.gst_percentage)
        .bind(product.final_price())
        .bind(product.description.as_deref())
        .bind(product.image_url.as_deref())
        .bind(product.stock_status)
        .bind(product.is_featured)
}
