// src/services/exporter.rs
//! Product catalog export.
//!
//! One pass over the product set produces both the CSV document and the
//! aggregate stock statistics. Two layouts are available:
//!
//! * [`ExportMode::Formatted`]: `;`-delimited, French headers, prices as
//!   `1 234,50 €`, a stock status column. Used by the download endpoint.
//! * [`ExportMode::Raw`]: plain `id,name,description,price,stock` dump. Used
//!   by the e-mail export.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use super::csv::{CsvWriter, QuoteStyle};
use crate::models::product::Product;
use crate::store::{CatalogStore, StoreError};

pub const MISSING_DESCRIPTION: &str = "Aucune description";
pub const MAX_DESCRIPTION_CHARS: usize = 100;

const FORMATTED_HEADER: [&str; 6] = ["ID", "Nom", "Description", "Prix", "Stock", "Statut Stock"];
const RAW_HEADER: [&str; 5] = ["id", "name", "description", "price", "stock"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Raw,
    Formatted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    OutOfStock,
    Low,
    Medium,
    High,
}

impl StockStatus {
    /// Stock is non-negative in storage; anything at or below zero reads as out of stock.
    pub fn from_stock(stock: i32) -> Self {
        match stock {
            i32::MIN..=0 => StockStatus::OutOfStock,
            1..=5 => StockStatus::Low,
            6..=10 => StockStatus::Medium,
            _ => StockStatus::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Rupture",
            StockStatus::Low => "Stock faible",
            StockStatus::Medium => "Stock moyen",
            StockStatus::High => "Stock élevé",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportStats {
    pub total_products: usize,
    pub total_value: f64,
    pub out_of_stock: usize,
    pub low_stock: usize,
}

impl ExportStats {
    fn record(&mut self, product: &Product) {
        self.total_products += 1;
        self.total_value += product.price * f64::from(product.stock);
        match StockStatus::from_stock(product.stock) {
            StockStatus::OutOfStock => self.out_of_stock += 1,
            StockStatus::Low => self.low_stock += 1,
            StockStatus::Medium | StockStatus::High => {}
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub csv: String,
    pub filename: String,
    pub stats: ExportStats,
}

/// `products_export_YYYY_MM_DD_HH_MM_SS.csv`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("products_export_{}.csv", now.format("%Y_%m_%d_%H_%M_%S"))
}

/// Flatten whitespace control characters, trim, and cap the length at
/// [`MAX_DESCRIPTION_CHARS`] characters (97 kept plus `...`).
pub fn clean_description(description: Option<&str>) -> String {
    let text = description.unwrap_or(MISSING_DESCRIPTION);
    let flattened: String = text
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect();
    let trimmed = flattened.trim_matches(|c| matches!(c, ' ' | '\0' | '\x0B'));

    if trimmed.chars().count() > MAX_DESCRIPTION_CHARS {
        let mut cut: String = trimmed.chars().take(MAX_DESCRIPTION_CHARS - 3).collect();
        cut.push_str("...");
        cut
    } else {
        trimmed.to_string()
    }
}

/// Two decimals, comma decimal separator, space thousands separator, ` €` suffix.
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped},{:02} €", cents % 100)
}

pub fn format_product_row(product: &Product) -> [String; 6] {
    [
        product.id.to_string(),
        product.name.clone(),
        clean_description(product.description.as_deref()),
        format_price(product.price),
        product.stock.to_string(),
        StockStatus::from_stock(product.stock).label().to_string(),
    ]
}

fn raw_product_row(product: &Product) -> [String; 5] {
    [
        product.id.to_string(),
        product.name.clone(),
        product.description.clone().unwrap_or_default(),
        format!("{:.2}", product.price),
        product.stock.to_string(),
    ]
}

pub fn export_products(products: &[Product], mode: ExportMode, now: DateTime<Utc>) -> ExportResult {
    let mut stats = ExportStats::default();
    let mut writer = match mode {
        ExportMode::Formatted => CsvWriter::new(';', QuoteStyle::Whitespace),
        ExportMode::Raw => CsvWriter::new(',', QuoteStyle::Necessary),
    };

    match mode {
        ExportMode::Formatted => writer.insert_row(FORMATTED_HEADER),
        ExportMode::Raw => writer.insert_row(RAW_HEADER),
    }

    for product in products {
        match mode {
            ExportMode::Formatted => writer.insert_row(format_product_row(product)),
            ExportMode::Raw => writer.insert_row(raw_product_row(product)),
        }
        stats.record(product);
    }

    ExportResult {
        csv: writer.into_string(),
        filename: export_filename(now),
        stats,
    }
}

/// Reads the whole catalog from the store and exports it.
#[derive(Clone)]
pub struct ProductExporter {
    store: Arc<dyn CatalogStore>,
}

impl ProductExporter {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn export(&self, mode: ExportMode) -> Result<ExportResult, StoreError> {
        let products = self.store.find_all_products().await?;
        let result = export_products(&products, mode, Utc::now());
        info!(
            filename = %result.filename,
            total_products = result.stats.total_products,
            total_value = result.stats.total_value,
            out_of_stock = result.stats.out_of_stock,
            low_stock = result.stats.low_stock,
            "Products exported"
        );
        Ok(result)
    }
}
