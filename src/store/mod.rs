// src/store/mod.rs
//! Read-side storage port for the catalog.
//!
//! Handlers and the export worker only ever see [`CatalogStore`]; the
//! PostgreSQL binding lives in [`postgres`] and an in-process implementation
//! used by tests and local runs lives in [`memory`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{product::Product, promo_code::PromoCode};

pub use memory::InMemoryCatalogStore;
pub use postgres::PgCatalogStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_all_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn find_product(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Exact match on `code`, restricted to codes owned by `product_id`.
    async fn find_promo_code(
        &self,
        code: &str,
        product_id: i64,
    ) -> Result<Option<PromoCode>, StoreError>;
}
