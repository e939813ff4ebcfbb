//! Composed attachment store
//!
//! Routes each upload through the backend selector and dispatches removals
//! on the stored reference's shape. This is the concrete implementation of
//! `AttachmentStorage` the API handlers hold.

use async_trait::async_trait;

use gazette_core::StorageMode;

use crate::filename::generate_filename;
use crate::local::LocalUploads;
use crate::media_service::MediaServiceClient;
use crate::selector::{select_backend, BackendChoice};
use crate::traits::{
    AttachmentStorage, EntityFolder, FileCategory, IncomingFile, StorageError, StorageResult,
};

pub struct AttachmentStore {
    mode: StorageMode,
    ephemeral_filesystem: bool,
    local: LocalUploads,
    remote: Option<MediaServiceClient>,
}

impl AttachmentStore {
    pub fn new(
        mode: StorageMode,
        ephemeral_filesystem: bool,
        local: LocalUploads,
        remote: Option<MediaServiceClient>,
    ) -> Self {
        AttachmentStore {
            mode,
            ephemeral_filesystem,
            local,
            remote,
        }
    }

    pub fn mode(&self) -> StorageMode {
        self.mode
    }

    fn remote_client(&self) -> StorageResult<&MediaServiceClient> {
        self.remote.as_ref().ok_or_else(|| {
            StorageError::ConfigError(
                "Remote backend selected but no media service client is configured".to_string(),
            )
        })
    }
}

#[async_trait]
impl AttachmentStorage for AttachmentStore {
    async fn store(&self, file: IncomingFile, folder: EntityFolder) -> StorageResult<String> {
        let category = FileCategory::from_content_type(&file.content_type)?;

        match select_backend(self.mode, self.ephemeral_filesystem, category) {
            BackendChoice::Remote => {
                let client = self.remote_client()?;
                let uploaded = client
                    .upload(
                        file.data,
                        &file.content_type,
                        folder.as_str(),
                        &file.original_file_name,
                    )
                    .await?;
                Ok(uploaded.secure_url)
            }
            BackendChoice::Local => {
                let filename = generate_filename(folder.file_prefix(), &file.original_file_name);
                self.local.write(folder.as_str(), &filename, &file.data).await
            }
        }
    }

    async fn remove(&self, reference: &str) {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            match &self.remote {
                Some(client) => {
                    if let Err(e) = client.destroy(reference).await {
                        tracing::warn!(reference = %reference, error = %e, "Remote attachment delete failed");
                    }
                }
                None => {
                    tracing::warn!(
                        reference = %reference,
                        "Remote attachment reference but no media service client configured"
                    );
                }
            }
        } else if self.local.owns_reference(reference) {
            if let Err(e) = self.local.delete(reference).await {
                tracing::warn!(reference = %reference, error = %e, "Local attachment delete failed");
            }
        } else {
            tracing::warn!(reference = %reference, "Unrecognized attachment reference, skipping delete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tempfile::tempdir;

    fn local_store(root: &std::path::Path) -> AttachmentStore {
        AttachmentStore::new(
            StorageMode::Local,
            false,
            LocalUploads::new(root, "/uploads"),
            None,
        )
    }

    fn pdf_file() -> IncomingFile {
        IncomingFile {
            data: Bytes::from_static(b"%PDF-1.4"),
            content_type: "application/pdf".to_string(),
            original_file_name: "job-spec.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn local_store_writes_under_entity_folder() {
        let dir = tempdir().unwrap();
        let store = local_store(dir.path());

        let reference = store.store(pdf_file(), EntityFolder::Careers).await.unwrap();

        assert!(reference.starts_with("/uploads/careers/career-"));
        assert!(reference.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn store_rejects_unsupported_content_type() {
        let dir = tempdir().unwrap();
        let store = local_store(dir.path());

        let file = IncomingFile {
            data: Bytes::from_static(b"GIF87a"),
            content_type: "application/zip".to_string(),
            original_file_name: "a.zip".to_string(),
        };

        let result = store.store(file, EntityFolder::Blogs).await;
        assert!(matches!(result, Err(StorageError::InvalidFileType(_))));
    }

    #[tokio::test]
    async fn remove_deletes_local_reference() {
        let dir = tempdir().unwrap();
        let store = local_store(dir.path());

        let reference = store.store(pdf_file(), EntityFolder::Careers).await.unwrap();
        let filename = reference.rsplit('/').next().unwrap().to_string();
        assert!(dir.path().join("careers").join(&filename).exists());

        store.remove(&reference).await;
        assert!(!dir.path().join("careers").join(&filename).exists());
    }

    #[tokio::test]
    async fn remove_swallows_unrecognized_references() {
        let dir = tempdir().unwrap();
        let store = local_store(dir.path());

        // None of these may panic or error.
        store.remove("/somewhere/else.jpg").await;
        store.remove("").await;
        store
            .remove("https://media.example.com/acme/image/upload/v1/blogs/a.jpg")
            .await;
    }

    #[tokio::test]
    async fn hybrid_without_remote_client_fails_image_store() {
        let dir = tempdir().unwrap();
        let store = AttachmentStore::new(
            StorageMode::Hybrid,
            false,
            LocalUploads::new(dir.path(), "/uploads"),
            None,
        );

        let file = IncomingFile {
            data: Bytes::from_static(b"\xff\xd8\xff"),
            content_type: "image/jpeg".to_string(),
            original_file_name: "photo.jpg".to_string(),
        };

        let result = store.store(file, EntityFolder::Blogs).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[tokio::test]
    async fn hybrid_stores_pdfs_locally_on_durable_filesystem() {
        let dir = tempdir().unwrap();
        let store = AttachmentStore::new(
            StorageMode::Hybrid,
            false,
            LocalUploads::new(dir.path(), "/uploads"),
            None,
        );

        let reference = store.store(pdf_file(), EntityFolder::Events).await.unwrap();
        assert!(reference.starts_with("/uploads/events/event-"));
    }
}
