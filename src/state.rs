// src/state.rs
use std::sync::Arc;

use crate::services::{export_queue::ExportQueue, exporter::ProductExporter};
use crate::store::CatalogStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub exporter: ProductExporter,
    pub export_queue: ExportQueue,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, export_queue: ExportQueue, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            exporter: ProductExporter::new(store.clone()),
            store,
            export_queue,
            jwt_secret: jwt_secret.into(),
        }
    }
}
