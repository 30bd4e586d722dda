// src/store/postgres.rs
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, instrument};

use super::{CatalogStore, StoreError};
use crate::models::{product::Product, promo_code::PromoCode};

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    #[instrument(skip(self))]
    async fn find_all_products(&self) -> Result<Vec<Product>, StoreError> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price::FLOAT8 AS price, stock
             FROM products ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(?e, "Failed to fetch products");
            e.into()
        })
    }

    #[instrument(skip(self))]
    async fn find_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price::FLOAT8 AS price, stock
             FROM products WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self, code))]
    async fn find_promo_code(
        &self,
        code: &str,
        product_id: i64,
    ) -> Result<Option<PromoCode>, StoreError> {
        let promo = sqlx::query_as::<_, PromoCode>(
            "SELECT id, name, code, percentage::FLOAT8 AS percentage, expires_at, product_id
             FROM promo_codes
             WHERE code = $1 AND product_id = $2
             ORDER BY id
             LIMIT 1"
        )
        .bind(code)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(promo)
    }
}
