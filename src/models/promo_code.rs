use serde::Serialize;
use sqlx::FromRow;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PromoCode {
    pub id: i64,
    pub name: String,
    pub code: String,
    // Not bounds-checked: values outside 0..=100 pass through the discount math.
    pub percentage: f64,
    pub expires_at: DateTime<Utc>,
    pub product_id: Option<i64>,
}

impl PromoCode {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    pub fn applies_to(&self, product_id: i64) -> bool {
        self.product_id == Some(product_id)
    }
}
