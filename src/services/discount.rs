// src/services/discount.rs
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{product::Product, promo_code::PromoCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromoCodeError {
    #[error("Code promo invalide ou non applicable à ce produit.")]
    InvalidOrInapplicable,
    #[error("Ce code promo est expiré.")]
    Expired,
}

/// No code entered. A lone `"0"` counts as blank as well.
pub fn is_blank_code(code: &str) -> bool {
    code.is_empty() || code == "0"
}

/// `price - price * percentage / 100`, with no clamping of the percentage.
pub fn discounted_price(price: f64, percentage: f64) -> f64 {
    let reduction = price * (percentage / 100.0);
    price - reduction
}

/// Resolve `code` against `candidates` for `product`.
///
/// `Ok(None)` means no code was entered. A code only applies to the product
/// that owns it and stays usable up to and including its expiration instant.
pub fn apply_promo_code(
    product: &Product,
    code: &str,
    candidates: &[PromoCode],
    now: DateTime<Utc>,
) -> Result<Option<f64>, PromoCodeError> {
    if is_blank_code(code) {
        return Ok(None);
    }

    let promo = candidates
        .iter()
        .find(|p| p.code == code && p.applies_to(product.id))
        .ok_or(PromoCodeError::InvalidOrInapplicable)?;

    if promo.is_expired_at(now) {
        return Err(PromoCodeError::Expired);
    }

    Ok(Some(discounted_price(product.price, promo.percentage)))
}
