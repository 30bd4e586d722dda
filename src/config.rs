// src/config.rs
use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub mail_from: String,
    pub export_queue_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| AppError::config(format!("{key} must be set")))
        };

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("PORT") {
            Some(p) => p
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid PORT: {e}")))?,
            None => 3000,
        };
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let mail_from = lookup("MAIL_FROM").unwrap_or_else(|| "noreply@yourdomain.com".to_string());
        let export_queue_capacity = match lookup("EXPORT_QUEUE_CAPACITY") {
            Some(c) => c
                .parse::<usize>()
                .map_err(|e| AppError::config(format!("Invalid EXPORT_QUEUE_CAPACITY: {e}")))?,
            None => 64,
        };

        tracing::info!(%host, port, "Configuration loaded");

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
            mail_from,
            export_queue_capacity,
        })
    }
}
