// src/services/promo.rs
//! Promo code validation shared by the product page submit and the live
//! `update_code` action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::discount::{apply_promo_code, is_blank_code, PromoCodeError};
use crate::error::AppError;
use crate::models::product::Product;
use crate::store::{CatalogStore, StoreError};

/// State of the promo code widget, passed in and handed back on every update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromoCodeState {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub discounted_price: Option<f64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

pub async fn resolve_product(store: &dyn CatalogStore, product_id: i64) -> Result<Product, AppError> {
    store
        .find_product(product_id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))
}

/// Look the code up for `product` and price it. Store failures are the only
/// error that escapes; an unusable code is reported in the inner result.
#[instrument(skip(store, product), fields(product_id = product.id))]
pub async fn validate_promo_code(
    store: &dyn CatalogStore,
    product: &Product,
    code: &str,
    now: DateTime<Utc>,
) -> Result<Result<Option<f64>, PromoCodeError>, StoreError> {
    if is_blank_code(code) {
        return Ok(Ok(None));
    }

    let candidate = store.find_promo_code(code, product.id).await?;
    let outcome = apply_promo_code(product, code, candidate.as_slice(), now);
    debug!(?outcome, "Promo code evaluated");
    Ok(outcome)
}

pub async fn update_code(
    store: &dyn CatalogStore,
    product: &Product,
    state: PromoCodeState,
    now: DateTime<Utc>,
) -> Result<PromoCodeState, StoreError> {
    let code = state.code.unwrap_or_default();
    let next = match validate_promo_code(store, product, &code, now).await? {
        Ok(discounted_price) => PromoCodeState {
            code: Some(code),
            discounted_price,
            error_message: None,
        },
        Err(e) => PromoCodeState {
            code: Some(code),
            discounted_price: None,
            error_message: Some(e.to_string()),
        },
    };
    Ok(next)
}
