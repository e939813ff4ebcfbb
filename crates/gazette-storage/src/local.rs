//! Local disk adapter
//!
//! Writes attachments under a fixed uploads root with per-entity
//! subdirectories and hands back server-relative references like
//! `/uploads/blogs/blog-1724-83.jpg` for later serving and deletion.

use std::path::PathBuf;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{StorageError, StorageResult};

/// Local filesystem storage for uploads
#[derive(Clone)]
pub struct LocalUploads {
    root: PathBuf,
    base_url: String,
}

impl LocalUploads {
    /// # Arguments
    /// * `root` - Directory files land under (e.g., "uploads")
    /// * `base_url` - Server-relative prefix references start with (e.g., "/uploads")
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        LocalUploads {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when a reference is one of ours (server-relative under the
    /// uploads prefix) rather than a remote URL.
    pub fn owns_reference(&self, reference: &str) -> bool {
        reference.starts_with(&format!("{}/", self.base_url))
    }

    /// Resolve a folder + filename to a path inside the uploads root,
    /// rejecting anything that could escape it.
    pub fn resolve(&self, folder: &str, filename: &str) -> StorageResult<PathBuf> {
        for part in [folder, filename] {
            if part.is_empty()
                || part.contains("..")
                || part.contains('/')
                || part.contains('\\')
                || part.starts_with('.')
            {
                return Err(StorageError::InvalidReference(format!(
                    "Path segment contains invalid characters: {}",
                    part
                )));
            }
        }
        Ok(self.root.join(folder).join(filename))
    }

    /// Write a file and return its server-relative reference. The target
    /// directory is created lazily; creation is idempotent so concurrent
    /// uploads into the same folder cannot fail on the mkdir step.
    pub async fn write(&self, folder: &str, filename: &str, data: &[u8]) -> StorageResult<String> {
        let path = self.resolve(folder, filename)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local upload written"
        );

        Ok(format!("{}/{}/{}", self.base_url, folder, filename))
    }

    /// Delete a file by its server-relative reference. Missing files are
    /// treated as already deleted.
    pub async fn delete(&self, reference: &str) -> StorageResult<()> {
        let relative = reference
            .strip_prefix(&format!("{}/", self.base_url))
            .ok_or_else(|| {
                StorageError::InvalidReference(format!(
                    "Reference is not under {}: {}",
                    self.base_url, reference
                ))
            })?;

        let (folder, filename) = relative.split_once('/').ok_or_else(|| {
            StorageError::InvalidReference(format!(
                "Reference is missing a folder segment: {}",
                reference
            ))
        })?;

        let path = self.resolve(folder, filename)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Local upload deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn write_returns_server_relative_reference() {
        let dir = tempdir().unwrap();
        let uploads = LocalUploads::new(dir.path(), "/uploads");

        let reference = uploads
            .write("blogs", "blog-1-2.jpg", b"jpeg bytes")
            .await
            .unwrap();

        assert_eq!(reference, "/uploads/blogs/blog-1-2.jpg");
        let on_disk = tokio::fs::read(dir.path().join("blogs/blog-1-2.jpg"))
            .await
            .unwrap();
        assert_eq!(on_disk, b"jpeg bytes");
    }

    #[tokio::test]
    async fn write_creates_folder_lazily_and_repeatedly() {
        let dir = tempdir().unwrap();
        let uploads = LocalUploads::new(dir.path(), "/uploads");

        uploads.write("events", "event-1-1.pdf", b"a").await.unwrap();
        uploads.write("events", "event-1-2.pdf", b"b").await.unwrap();

        assert!(dir.path().join("events").is_dir());
    }

    #[tokio::test]
    async fn delete_round_trip() {
        let dir = tempdir().unwrap();
        let uploads = LocalUploads::new(dir.path(), "/uploads");

        let reference = uploads
            .write("careers", "career-9-9.pdf", b"pdf")
            .await
            .unwrap();
        uploads.delete(&reference).await.unwrap();

        assert!(!dir.path().join("careers/career-9-9.pdf").exists());
    }

    #[tokio::test]
    async fn delete_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let uploads = LocalUploads::new(dir.path(), "/uploads");

        let result = uploads.delete("/uploads/blogs/never-existed.jpg").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn traversal_attempts_are_rejected() {
        let dir = tempdir().unwrap();
        let uploads = LocalUploads::new(dir.path(), "/uploads");

        let result = uploads.delete("/uploads/blogs/../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidReference(_))));

        let result = uploads.resolve("blogs", "../secret");
        assert!(matches!(result, Err(StorageError::InvalidReference(_))));

        let result = uploads.resolve("..", "file.jpg");
        assert!(matches!(result, Err(StorageError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn foreign_references_are_rejected() {
        let dir = tempdir().unwrap();
        let uploads = LocalUploads::new(dir.path(), "/uploads");

        assert!(!uploads.owns_reference("https://media.example.com/image/upload/v1/a.jpg"));
        let result = uploads.delete("/srv/other/file.jpg").await;
        assert!(matches!(result, Err(StorageError::InvalidReference(_))));
    }
}
