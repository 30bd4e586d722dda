// src/services/flash.rs
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use super::exporter::ExportStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Warning,
    Info,
    Error,
}

impl FlashLevel {
    fn header_name(self) -> HeaderName {
        HeaderName::from_static(match self {
            FlashLevel::Success => "x-flash-success",
            FlashLevel::Warning => "x-flash-warning",
            FlashLevel::Info => "x-flash-info",
            FlashLevel::Error => "x-flash-error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Error, message)
    }
}

/// Notifications shown after a successful download export.
pub fn export_flashes(stats: &ExportStats) -> Vec<Flash> {
    let mut flashes = vec![Flash::new(
        FlashLevel::Success,
        format!("Export réussi ! {} produits exportés.", stats.total_products),
    )];
    if stats.out_of_stock > 0 {
        flashes.push(Flash::new(
            FlashLevel::Warning,
            format!("{} produit(s) en rupture de stock détecté(s)", stats.out_of_stock),
        ));
    }
    if stats.low_stock > 0 {
        flashes.push(Flash::new(
            FlashLevel::Info,
            format!("{} produit(s) en stock faible détecté(s)", stats.low_stock),
        ));
    }
    flashes
}

/// Header values cannot carry control characters; each one becomes a space.
fn header_safe(message: &str) -> String {
    message
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Attach each flash as an `X-Flash-<Level>` header (UTF-8 bytes, unencoded).
pub fn append_flash_headers(headers: &mut HeaderMap, flashes: &[Flash]) {
    for flash in flashes {
        match HeaderValue::from_bytes(header_safe(&flash.message).as_bytes()) {
            Ok(value) => {
                headers.append(flash.level.header_name(), value);
            }
            Err(e) => tracing::warn!(error = %e, message = %flash.message, "Flash not representable as header"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_success_when_stock_is_healthy() {
        let stats = ExportStats { total_products: 3, total_value: 10.0, out_of_stock: 0, low_stock: 0 };
        let flashes = export_flashes(&stats);
        assert_eq!(flashes, vec![Flash::new(FlashLevel::Success, "Export réussi ! 3 produits exportés.")]);
    }

    #[test]
    fn warnings_for_out_of_stock_and_low_stock() {
        let stats = ExportStats { total_products: 2, total_value: 54.95, out_of_stock: 1, low_stock: 1 };
        let flashes = export_flashes(&stats);
        assert_eq!(flashes.len(), 3);
        assert_eq!(flashes[1].level, FlashLevel::Warning);
        assert_eq!(flashes[1].message, "1 produit(s) en rupture de stock détecté(s)");
        assert_eq!(flashes[2].level, FlashLevel::Info);
        assert_eq!(flashes[2].message, "1 produit(s) en stock faible détecté(s)");
    }

    #[test]
    fn headers_carry_utf8_messages() {
        let mut headers = HeaderMap::new();
        append_flash_headers(&mut headers, &[Flash::error("Erreur lors de l'export : é")]);
        let value = headers.get("x-flash-error").unwrap();
        assert_eq!(value.as_bytes(), "Erreur lors de l'export : é".as_bytes());
    }

    #[test]
    fn multi_line_messages_are_flattened() {
        let mut headers = HeaderMap::new();
        append_flash_headers(&mut headers, &[Flash::error("server closed\nthe\r\tconnection")]);
        let value = headers.get("x-flash-error").unwrap();
        assert_eq!(value.as_bytes(), b"server closed the  connection");
    }
}
