//! Application setup and initialization
//!
//! All startup logic lives here instead of main.rs: configuration
//! validation, telemetry, database pool and migrations, attachment storage,
//! and route construction.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use gazette_core::Config;

use crate::services::email::EmailService;
use crate::state::{AppState, DbState, UploadState};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();

    tracing::info!(
        environment = %config.environment(),
        storage_mode = %config.storage_mode(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;

    let uploads = storage::setup_storage(&config)?;

    let email = EmailService::from_config(&config);
    if email.is_none() {
        tracing::info!("SMTP not configured, contact notifications disabled");
    }

    let is_production = config.is_production();
    let state = Arc::new(AppState {
        db: DbState::new(pool),
        uploads,
        email,
        config,
        is_production,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}

/// Build the upload sub-state from configuration.
pub(crate) fn upload_state(
    config: &Config,
    storage: Arc<dyn gazette_storage::AttachmentStorage>,
) -> UploadState {
    UploadState {
        storage,
        local: gazette_storage::LocalUploads::new(config.uploads_root(), config.uploads_base_url()),
        max_image_size_bytes: config.max_image_size_bytes(),
        max_document_size_bytes: config.max_document_size_bytes(),
    }
}
