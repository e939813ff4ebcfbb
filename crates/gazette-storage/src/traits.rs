//! Attachment storage abstraction
//!
//! This module defines the AttachmentStorage trait that entity handlers use
//! for all file side effects, keeping them agnostic of which backend a file
//! lands on.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use gazette_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported file type: {0}")]
    InvalidFileType(String),

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid attachment reference: {0}")]
    InvalidReference(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidFileType(msg) => AppError::InvalidInput(msg),
            StorageError::FileTooLarge { size, max } => AppError::FileTooLarge { size, max },
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// File category accepted by the upload path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Pdf,
}

impl FileCategory {
    /// Classify a MIME type, rejecting anything that is not an image or a PDF.
    pub fn from_content_type(content_type: &str) -> StorageResult<Self> {
        if content_type.starts_with("image/") {
            Ok(FileCategory::Image)
        } else if content_type == "application/pdf" {
            Ok(FileCategory::Pdf)
        } else {
            Err(StorageError::InvalidFileType(format!(
                "Unsupported content type: {}. Only images and PDFs are accepted.",
                content_type
            )))
        }
    }
}

/// Per-entity upload namespace. Doubles as the local subdirectory name and
/// the remote folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityFolder {
    Blogs,
    Events,
    Careers,
    Gallery,
}

impl EntityFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityFolder::Blogs => "blogs",
            EntityFolder::Events => "events",
            EntityFolder::Careers => "careers",
            EntityFolder::Gallery => "gallery",
        }
    }

    /// Filename prefix for generated names ("blog-<millis>-<random>.<ext>").
    pub fn file_prefix(&self) -> &'static str {
        match self {
            EntityFolder::Blogs => "blog",
            EntityFolder::Events => "event",
            EntityFolder::Careers => "career",
            EntityFolder::Gallery => "gallery",
        }
    }
}

/// Validation rules for one upload endpoint
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub allow_pdf: bool,
    pub max_bytes: usize,
}

impl UploadPolicy {
    pub fn images_only(max_bytes: usize) -> Self {
        UploadPolicy {
            allow_pdf: false,
            max_bytes,
        }
    }

    pub fn images_and_pdfs(max_bytes: usize) -> Self {
        UploadPolicy {
            allow_pdf: true,
            max_bytes,
        }
    }
}

/// A file extracted from a multipart request, ready for storage.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub data: Bytes,
    pub content_type: String,
    pub original_file_name: String,
}

impl IncomingFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Check an incoming file against an endpoint's policy. Type violations and
/// size violations are distinct errors so callers can surface different
/// messages.
pub fn validate_upload(file: &IncomingFile, policy: &UploadPolicy) -> StorageResult<FileCategory> {
    let category = FileCategory::from_content_type(&file.content_type)?;

    if category == FileCategory::Pdf && !policy.allow_pdf {
        return Err(StorageError::InvalidFileType(
            "Only images are accepted by this endpoint".to_string(),
        ));
    }

    if file.size() > policy.max_bytes {
        return Err(StorageError::FileTooLarge {
            size: file.size(),
            max: policy.max_bytes,
        });
    }

    Ok(category)
}

/// Backend-agnostic attachment storage.
///
/// `store` must complete before any database write referencing the returned
/// reference. `remove` is best-effort: failures are logged by the
/// implementation and never propagate.
#[async_trait]
pub trait AttachmentStorage: Send + Sync {
    /// Validate an incoming file against an endpoint's policy.
    fn validate(&self, file: &IncomingFile, policy: &UploadPolicy) -> StorageResult<FileCategory> {
        validate_upload(file, policy)
    }

    /// Store the file on the backend selected for its category and return
    /// the canonical attachment reference (absolute URL or server-relative
    /// path).
    async fn store(&self, file: IncomingFile, folder: EntityFolder) -> StorageResult<String>;

    /// Best-effort delete of a previously stored attachment. Dispatches on
    /// the reference's shape to find the owning backend.
    async fn remove(&self, reference: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, size: usize) -> IncomingFile {
        IncomingFile {
            data: Bytes::from(vec![0u8; size]),
            content_type: content_type.to_string(),
            original_file_name: "sample.bin".to_string(),
        }
    }

    #[test]
    fn accepts_images_and_pdfs() {
        let policy = UploadPolicy::images_and_pdfs(1024);
        assert_eq!(
            validate_upload(&file("image/jpeg", 100), &policy).unwrap(),
            FileCategory::Image
        );
        assert_eq!(
            validate_upload(&file("application/pdf", 100), &policy).unwrap(),
            FileCategory::Pdf
        );
    }

    #[test]
    fn rejects_other_content_types() {
        let policy = UploadPolicy::images_and_pdfs(1024);
        let result = validate_upload(&file("video/mp4", 100), &policy);
        assert!(matches!(result, Err(StorageError::InvalidFileType(_))));
    }

    #[test]
    fn rejects_pdf_on_image_only_endpoint() {
        let policy = UploadPolicy::images_only(1024);
        let result = validate_upload(&file("application/pdf", 100), &policy);
        assert!(matches!(result, Err(StorageError::InvalidFileType(_))));
    }

    #[test]
    fn size_violation_is_distinct_from_type_violation() {
        let policy = UploadPolicy::images_and_pdfs(1024);
        let result = validate_upload(&file("image/png", 2048), &policy);
        assert!(matches!(
            result,
            Err(StorageError::FileTooLarge {
                size: 2048,
                max: 1024
            })
        ));
    }

    #[test]
    fn size_at_limit_is_accepted() {
        let policy = UploadPolicy::images_only(1024);
        assert!(validate_upload(&file("image/png", 1024), &policy).is_ok());
    }
}
