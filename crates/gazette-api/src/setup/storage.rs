//! Attachment storage setup

use std::sync::Arc;

use anyhow::{Context, Result};
use gazette_core::Config;
use gazette_storage::{create_attachment_store, AttachmentStorage};

use crate::state::UploadState;

/// Build the attachment store and upload limits from configuration.
pub fn setup_storage(config: &Config) -> Result<UploadState> {
    let store = create_attachment_store(config).context("Failed to initialize attachment store")?;
    let storage: Arc<dyn AttachmentStorage> = Arc::new(store);

    Ok(super::upload_state(config, storage))
}
