// src/main.rs
use std::net::{IpAddr, SocketAddr};
use std::process;
use std::sync::Arc;

use catalog_backend::{
    build_app,
    config::AppConfig,
    database,
    services::{
        export_queue::{ExportQueue, ExportWorker},
        exporter::ProductExporter,
        mailer::LogMailer,
    },
    state::AppState,
    store::{CatalogStore, PgCatalogStore},
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            process::exit(1);
        }
    };

    // Create database pool
    let db_pool = match database::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create database pool");
            process::exit(1);
        }
    };
    let store: Arc<dyn CatalogStore> = Arc::new(PgCatalogStore::new(db_pool));

    // Export-by-email worker
    let (export_queue, export_rx) = ExportQueue::channel(config.export_queue_capacity);
    ExportWorker::new(ProductExporter::new(store.clone()), Arc::new(LogMailer), config.mail_from.clone())
        .spawn(export_rx);

    // Create application state
    let app_state = AppState::new(store, export_queue, config.jwt_secret.as_str());
    let app = build_app(app_state);

    let host: IpAddr = config.host.parse().unwrap_or(IpAddr::from([127, 0, 0, 1]));
    let base_port = config.port;

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                process::exit(1);
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
        process::exit(1);
    }
}
