//! Attachment lifecycle orchestration
//!
//! Ordering rules shared by all entity handlers:
//! - store-before-persist: the file must land on its backend before any
//!   database write references it
//! - orphan cleanup: if persistence fails after a successful upload, the
//!   uploaded object is deleted before the error propagates
//! - replace-on-update: the previous attachment is deleted only after the
//!   new state is durably persisted; old-deletion failures never roll back
//!   the persisted update

use std::future::Future;

use gazette_core::models::{format_display_size, Attachment, FileKind};
use gazette_core::AppError;
use gazette_storage::{AttachmentStorage, EntityFolder, FileCategory, IncomingFile, UploadPolicy};

/// Validate and store an incoming file, returning the attachment record to
/// embed in the entity.
pub async fn stage_attachment(
    storage: &dyn AttachmentStorage,
    file: IncomingFile,
    folder: EntityFolder,
    policy: UploadPolicy,
) -> Result<Attachment, AppError> {
    let category = storage.validate(&file, &policy)?;
    let original_file_name = file.original_file_name.clone();
    let display_size = format_display_size(file.size());

    let reference = storage.store(file, folder).await?;

    Ok(Attachment {
        file_url: Some(reference),
        file_type: match category {
            FileCategory::Image => FileKind::Image,
            FileCategory::Pdf => FileKind::Pdf,
        },
        original_file_name: Some(original_file_name),
        display_size: Some(display_size),
    })
}

/// Run the database persist for an entity. `staged` is the attachment
/// freshly uploaded for this request, if any: on persist failure it is
/// removed from its backend so no orphan is left. An attachment kept from
/// the existing record must not be passed here.
pub async fn persist_with_cleanup<T, Fut>(
    storage: &dyn AttachmentStorage,
    staged: Option<&Attachment>,
    persist: Fut,
) -> Result<T, AppError>
where
    Fut: Future<Output = Result<T, AppError>>,
{
    match persist.await {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Some(reference) = staged.and_then(|a| a.file_url.as_deref()) {
                tracing::warn!(
                    reference = %reference,
                    "Persistence failed after upload, removing orphaned file"
                );
                storage.remove(reference).await;
            }
            Err(err)
        }
    }
}

/// The attachment state an update should persist: a staged replacement wins,
/// otherwise the explicit remove flag clears, otherwise the current
/// attachment is kept.
pub fn next_attachment(
    current: Attachment,
    staged: Option<Attachment>,
    remove_file: bool,
) -> Attachment {
    match staged {
        Some(replacement) => replacement,
        None if remove_file => Attachment::none(),
        None => current,
    }
}

/// Delete the previous attachment once the new state is persisted. No-op
/// when nothing was replaced.
pub async fn cleanup_replaced(
    storage: &dyn AttachmentStorage,
    previous: &Attachment,
    persisted: &Attachment,
) {
    if let Some(old_ref) = previous.file_url.as_deref() {
        if persisted.file_url.as_deref() != Some(old_ref) {
            storage.remove(old_ref).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    /// Test double that records stored/removed references and can be told
    /// to fail uploads.
    #[derive(Default)]
    struct RecordingStorage {
        stored: Mutex<Vec<String>>,
        removed: Mutex<Vec<String>>,
        fail_store: bool,
    }

    impl RecordingStorage {
        fn stored(&self) -> Vec<String> {
            self.stored.lock().unwrap().clone()
        }

        fn removed(&self) -> Vec<String> {
            self.removed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AttachmentStorage for RecordingStorage {
        async fn store(
            &self,
            file: IncomingFile,
            folder: EntityFolder,
        ) -> gazette_storage::StorageResult<String> {
            if self.fail_store {
                return Err(gazette_storage::StorageError::UploadFailed(
                    "simulated".to_string(),
                ));
            }
            let reference = format!("/uploads/{}/{}", folder.as_str(), file.original_file_name);
            self.stored.lock().unwrap().push(reference.clone());
            Ok(reference)
        }

        async fn remove(&self, reference: &str) {
            self.removed.lock().unwrap().push(reference.to_string());
        }
    }

    fn jpeg(name: &str) -> IncomingFile {
        IncomingFile {
            data: Bytes::from(vec![0u8; 2048]),
            content_type: "image/jpeg".to_string(),
            original_file_name: name.to_string(),
        }
    }

    fn pdf(name: &str) -> IncomingFile {
        IncomingFile {
            data: Bytes::from(vec![0u8; 4096]),
            content_type: "application/pdf".to_string(),
            original_file_name: name.to_string(),
        }
    }

    fn policy() -> UploadPolicy {
        UploadPolicy::images_and_pdfs(10 * 1024 * 1024)
    }

    #[tokio::test]
    async fn staged_attachment_carries_metadata() {
        let storage = RecordingStorage::default();
        let attachment = stage_attachment(&storage, jpeg("cover.jpg"), EntityFolder::Blogs, policy())
            .await
            .unwrap();

        assert_eq!(
            attachment.file_url.as_deref(),
            Some("/uploads/blogs/cover.jpg")
        );
        assert_eq!(attachment.file_type, FileKind::Image);
        assert_eq!(attachment.original_file_name.as_deref(), Some("cover.jpg"));
        assert_eq!(attachment.display_size.as_deref(), Some("2 KB"));
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_backend() {
        let storage = RecordingStorage::default();
        let oversized = IncomingFile {
            data: Bytes::from(vec![0u8; 64]),
            content_type: "application/pdf".to_string(),
            original_file_name: "big.pdf".to_string(),
        };

        let result = stage_attachment(
            &storage,
            oversized,
            EntityFolder::Careers,
            UploadPolicy::images_and_pdfs(32),
        )
        .await;

        assert!(matches!(result, Err(AppError::FileTooLarge { .. })));
        assert!(storage.stored().is_empty());
    }

    #[tokio::test]
    async fn persist_success_leaves_upload_in_place() {
        let storage = RecordingStorage::default();
        let staged = stage_attachment(&storage, jpeg("a.jpg"), EntityFolder::Blogs, policy())
            .await
            .unwrap();

        let persisted: Attachment =
            persist_with_cleanup(&storage, Some(&staged), async { Ok(staged.clone()) })
                .await
                .unwrap();

        assert!(persisted.is_present());
        assert!(storage.removed().is_empty());
    }

    #[tokio::test]
    async fn persist_failure_removes_orphan() {
        let storage = RecordingStorage::default();
        let staged = stage_attachment(&storage, jpeg("a.jpg"), EntityFolder::Blogs, policy())
            .await
            .unwrap();

        let result: Result<(), AppError> = persist_with_cleanup(&storage, Some(&staged), async {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(storage.removed(), vec!["/uploads/blogs/a.jpg"]);
    }

    #[tokio::test]
    async fn persist_failure_without_upload_removes_nothing() {
        let storage = RecordingStorage::default();

        let result: Result<(), AppError> = persist_with_cleanup(&storage, None, async {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        })
        .await;

        assert!(result.is_err());
        assert!(storage.removed().is_empty());
    }

    #[tokio::test]
    async fn replacing_image_with_pdf_deletes_old_after_persist() {
        let storage = RecordingStorage::default();

        let old = stage_attachment(&storage, jpeg("old.jpg"), EntityFolder::Blogs, policy())
            .await
            .unwrap();
        let staged = stage_attachment(&storage, pdf("new.pdf"), EntityFolder::Blogs, policy())
            .await
            .unwrap();

        let new_state = next_attachment(old.clone(), Some(staged.clone()), false);
        let persisted =
            persist_with_cleanup(&storage, Some(&staged), async { Ok(new_state.clone()) })
                .await
                .unwrap();

        // Exactly one of the derived URLs is set after the swap.
        assert!(persisted.pdf_url().is_some());
        assert!(persisted.image_url().is_none());

        // Old file deleted only once the new state is persisted.
        assert!(storage.removed().is_empty());
        cleanup_replaced(&storage, &old, &persisted).await;
        assert_eq!(storage.removed(), vec!["/uploads/blogs/old.jpg"]);
    }

    #[tokio::test]
    async fn remove_flag_clears_and_deletes_old() {
        let storage = RecordingStorage::default();
        let old = stage_attachment(&storage, pdf("spec.pdf"), EntityFolder::Careers, policy())
            .await
            .unwrap();

        let new_state = next_attachment(old.clone(), None, true);
        assert!(!new_state.is_present());

        cleanup_replaced(&storage, &old, &new_state).await;
        assert_eq!(storage.removed(), vec!["/uploads/careers/spec.pdf"]);
    }

    #[tokio::test]
    async fn keeping_attachment_deletes_nothing() {
        let storage = RecordingStorage::default();
        let old = stage_attachment(&storage, jpeg("keep.jpg"), EntityFolder::Events, policy())
            .await
            .unwrap();

        let new_state = next_attachment(old.clone(), None, false);
        assert_eq!(new_state, old);

        cleanup_replaced(&storage, &old, &new_state).await;
        assert!(storage.removed().is_empty());
    }
}
