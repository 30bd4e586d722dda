// src/store/memory.rs
use std::sync::RwLock;

use async_trait::async_trait;

use super::{CatalogStore, StoreError};
use crate::models::{product::Product, promo_code::PromoCode};

/// Catalog held in process memory. Products come back ordered by id.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    products: RwLock<Vec<Product>>,
    promo_codes: RwLock<Vec<PromoCode>>,
    unavailable: RwLock<Option<String>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::new();
        if let Ok(mut rows) = store.products.write() {
            *rows = products;
        }
        store
    }

    pub fn insert_promo_code(&self, promo: PromoCode) {
        if let Ok(mut rows) = self.promo_codes.write() {
            rows.push(promo);
        }
    }

    /// Make every subsequent read fail with `StoreError::Unavailable`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        if let Ok(mut slot) = self.unavailable.write() {
            *slot = Some(reason.into());
        }
    }

    fn check_available(&self) -> Result<(), StoreError> {
        let slot = self
            .unavailable
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        match slot.as_ref() {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn find_all_products(&self) -> Result<Vec<Product>, StoreError> {
        self.check_available()?;
        let rows = self
            .products
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        let mut products = rows.clone();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        self.check_available()?;
        let rows = self
            .products
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_promo_code(
        &self,
        code: &str,
        product_id: i64,
    ) -> Result<Option<PromoCode>, StoreError> {
        self.check_available()?;
        let rows = self
            .promo_codes
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        Ok(rows
            .iter()
            .find(|p| p.code == code && p.applies_to(product_id))
            .cloned())
    }
}
