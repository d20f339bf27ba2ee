//! Shop metadata, read-only on the storefront.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use larder_core::{ShopInfo, ShopInfoId};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct ShopInfoRow {
    id: i32,
    shop_name: String,
    owner_name: Option<String>,
    business_idea: Option<String>,
    concept_vision: Option<String>,
    logo_url: Option<String>,
    banner_url: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ShopInfoRow> for ShopInfo {
    fn from(row: ShopInfoRow) -> Self {
        Self {
            id: ShopInfoId::new(row.id),
            shop_name: row.shop_name,
            owner_name: row.owner_name,
            business_idea: row.business_idea,
            concept_vision: row.concept_vision,
            logo_url: row.logo_url,
            banner_url: row.banner_url,
            address: row.address,
            phone: row.phone,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for the shop metadata row.
pub struct ShopInfoRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShopInfoRepository<'a> {
    /// Create a new shop info repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The shop metadata, if an admin has saved it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self) -> Result<Option<ShopInfo>, RepositoryError> {
        let row = sqlx::query_as::<_, ShopInfoRow>(
            r"
            SELECT id, shop_name, owner_name, business_idea, concept_vision,
                   logo_url, banner_url, address, phone, email,
                   created_at, updated_at
            FROM shop_info
            LIMIT 1
            ",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
