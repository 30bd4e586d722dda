// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::services::exporter::StockStatus;
use crate::services::flash::Flash;

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub stock_status: &'static str,
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            stock_status: StockStatus::from_stock(product.stock).label(),
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PromoCodeForm {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub discounted_price: Option<f64>,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
