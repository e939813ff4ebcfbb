//! Attachment store construction from configuration

use gazette_core::{Config, StorageMode};

use crate::local::LocalUploads;
use crate::media_service::MediaServiceClient;
use crate::store::AttachmentStore;
use crate::traits::{StorageError, StorageResult};

/// Build the attachment store the configuration asks for. The backend
/// decision is resolved once here, not per request.
pub fn create_attachment_store(config: &Config) -> StorageResult<AttachmentStore> {
    let local = LocalUploads::new(config.uploads_root(), config.uploads_base_url());

    let remote = if config.storage_mode() == StorageMode::Local {
        None
    } else {
        let url = config.media_service_url().ok_or_else(|| {
            StorageError::ConfigError("MEDIA_SERVICE_URL is not configured".to_string())
        })?;
        let cloud = config.media_service_cloud().ok_or_else(|| {
            StorageError::ConfigError("MEDIA_SERVICE_CLOUD is not configured".to_string())
        })?;
        let api_key = config.media_service_api_key().ok_or_else(|| {
            StorageError::ConfigError("MEDIA_SERVICE_API_KEY is not configured".to_string())
        })?;
        Some(MediaServiceClient::new(url, cloud, api_key))
    };

    tracing::info!(
        mode = %config.storage_mode(),
        ephemeral = config.ephemeral_filesystem(),
        uploads_root = %config.uploads_root(),
        "Attachment store initialized"
    );

    Ok(AttachmentStore::new(
        config.storage_mode(),
        config.ephemeral_filesystem(),
        local,
        remote,
    ))
}
