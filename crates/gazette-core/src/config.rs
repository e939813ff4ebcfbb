//! Configuration module
//!
//! Environment-driven configuration for the API service: server, database,
//! storage routing, upload ceilings, and contact-mail settings.

use std::env;

use crate::storage_types::StorageMode;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_IMAGE_SIZE_MB: usize = 5;
const MAX_DOCUMENT_SIZE_MB: usize = 20;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    environment: String,
    cors_origins: Vec<String>,
    database_url: String,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    // Storage routing
    storage_mode: StorageMode,
    ephemeral_filesystem: bool,
    uploads_root: String,
    uploads_base_url: String,
    media_service_url: Option<String>,
    media_service_cloud: Option<String>,
    media_service_api_key: Option<String>,
    // Upload ceilings
    max_image_size_bytes: usize,
    max_document_size_bytes: usize,
    // Contact notification mail
    contact_notify_email: Option<String>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    smtp_user: Option<String>,
    smtp_password: Option<String>,
    smtp_from: Option<String>,
    smtp_tls: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_mode = env::var("STORAGE_MODE")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<StorageMode>()?;

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            storage_mode,
            ephemeral_filesystem: env::var("EPHEMERAL_FILESYSTEM")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            uploads_root: env::var("UPLOADS_ROOT").unwrap_or_else(|_| "uploads".to_string()),
            uploads_base_url: env::var("UPLOADS_BASE_URL")
                .unwrap_or_else(|_| "/uploads".to_string()),
            media_service_url: env::var("MEDIA_SERVICE_URL").ok(),
            media_service_cloud: env::var("MEDIA_SERVICE_CLOUD").ok(),
            media_service_api_key: env::var("MEDIA_SERVICE_API_KEY").ok(),
            max_image_size_bytes: env::var("MAX_IMAGE_SIZE_MB")
                .unwrap_or_else(|_| MAX_IMAGE_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_IMAGE_SIZE_MB)
                * 1024
                * 1024,
            max_document_size_bytes: env::var("MAX_DOCUMENT_SIZE_MB")
                .unwrap_or_else(|_| MAX_DOCUMENT_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_DOCUMENT_SIZE_MB)
                * 1024
                * 1024,
            contact_notify_email: env::var("CONTACT_NOTIFY_EMAIL").ok(),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT").ok().and_then(|s| s.parse().ok()),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_from: env::var("SMTP_FROM").ok(),
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
        };

        Ok(config)
    }

    /// Fail fast on inconsistent configuration.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_mode != StorageMode::Local {
            if self.media_service_url.is_none() {
                return Err(anyhow::anyhow!(
                    "MEDIA_SERVICE_URL must be set when STORAGE_MODE is {}",
                    self.storage_mode
                ));
            }
            if self.media_service_cloud.is_none() {
                return Err(anyhow::anyhow!(
                    "MEDIA_SERVICE_CLOUD must be set when STORAGE_MODE is {}",
                    self.storage_mode
                ));
            }
            if self.media_service_api_key.is_none() {
                return Err(anyhow::anyhow!(
                    "MEDIA_SERVICE_API_KEY must be set when STORAGE_MODE is {}",
                    self.storage_mode
                ));
            }
        }

        if self.storage_mode == StorageMode::Local && self.ephemeral_filesystem {
            return Err(anyhow::anyhow!(
                "STORAGE_MODE=local cannot be combined with EPHEMERAL_FILESYSTEM=true"
            ));
        }

        if self.max_image_size_bytes == 0 || self.max_document_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size ceilings must be non-zero"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.storage_mode
    }

    pub fn ephemeral_filesystem(&self) -> bool {
        self.ephemeral_filesystem
    }

    pub fn uploads_root(&self) -> &str {
        &self.uploads_root
    }

    pub fn uploads_base_url(&self) -> &str {
        &self.uploads_base_url
    }

    pub fn media_service_url(&self) -> Option<&str> {
        self.media_service_url.as_deref()
    }

    pub fn media_service_cloud(&self) -> Option<&str> {
        self.media_service_cloud.as_deref()
    }

    pub fn media_service_api_key(&self) -> Option<&str> {
        self.media_service_api_key.as_deref()
    }

    pub fn max_image_size_bytes(&self) -> usize {
        self.max_image_size_bytes
    }

    pub fn max_document_size_bytes(&self) -> usize {
        self.max_document_size_bytes
    }

    pub fn contact_notify_email(&self) -> Option<&str> {
        self.contact_notify_email.as_deref()
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> Option<u16> {
        self.smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.smtp_password.as_deref()
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.smtp_from.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.smtp_tls
    }
}
