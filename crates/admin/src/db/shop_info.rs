//! Shop metadata repository.
//!
//! The table holds at most one row, enforced by a unique `singleton` column.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use larder_core::{ShopInfo, ShopInfoId, ShopInfoInput};

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

    /// The shop metadata, if it has been set.
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

    /// Create or replace the shop metadata.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, input: &ShopInfoInput) -> Result<ShopInfo, RepositoryError> {
        let row = sqlx::query_as::<_, ShopInfoRow>(
            r"
            INSERT INTO shop_info (
                shop_name, owner_name, business_idea, concept_vision,
                logo_url, banner_url, address, phone, email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (singleton) DO UPDATE SET
                shop_name = EXCLUDED.shop_name,
                owner_name = EXCLUDED.owner_name,
                business_idea = EXCLUDED.business_idea,
                concept_vision = EXCLUDED.concept_vision,
                logo_url = EXCLUDED.logo_url,
                banner_url = EXCLUDED.banner_url,
                address = EXCLUDED.address,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                updated_at = NOW()
            RETURNING id, shop_name, owner_name, business_idea, concept_vision,
                      logo_url, banner_url, address, phone, email,
                      created_at, updated_at
            ",
        )
        .bind(&input.shop_name)
        .bind(input.owner_name.as_deref())
        .bind(input.business_idea.as_deref())
        .bind(input.concept_vision.as_deref())
        .bind(input.logo_url.as_deref())
        .bind(input.banner_url.as_deref())
        .bind(input.address.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.email.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
