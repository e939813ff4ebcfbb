use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of file attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "file_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Pdf,
    None,
}

impl Default for FileKind {
    fn default() -> Self {
        FileKind::None
    }
}

/// Attachment fields embedded in an entity record.
///
/// An entity owns at most one attachment at a time; `file_type` tells
/// whether `file_url` points at an image or a PDF. All fields are null
/// together when no attachment is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_url: Option<String>,
    pub file_type: FileKind,
    pub original_file_name: Option<String>,
    pub display_size: Option<String>,
}

impl Attachment {
    /// The empty attachment (no file set).
    pub fn none() -> Self {
        Attachment {
            file_url: None,
            file_type: FileKind::None,
            original_file_name: None,
            display_size: None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.file_url.is_some() && self.file_type != FileKind::None
    }

    /// The stored reference, but only when the attachment is an image.
    pub fn image_url(&self) -> Option<&str> {
        match self.file_type {
            FileKind::Image => self.file_url.as_deref(),
            _ => None,
        }
    }

    /// The stored reference, but only when the attachment is a PDF.
    pub fn pdf_url(&self) -> Option<&str> {
        match self.file_type {
            FileKind::Pdf => self.file_url.as_deref(),
            _ => None,
        }
    }
}

impl Default for Attachment {
    fn default() -> Self {
        Attachment::none()
    }
}

/// Format a byte count for display ("342 KB", "2.4 MB").
pub fn format_display_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.1} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.0} KB", bytes_f / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_attachment_has_no_urls() {
        let a = Attachment::none();
        assert!(!a.is_present());
        assert_eq!(a.image_url(), None);
        assert_eq!(a.pdf_url(), None);
    }

    #[test]
    fn image_attachment_exposes_only_image_url() {
        let a = Attachment {
            file_url: Some("/uploads/blogs/blog-17-42.jpg".to_string()),
            file_type: FileKind::Image,
            original_file_name: Some("cover.jpg".to_string()),
            display_size: Some("342 KB".to_string()),
        };
        assert_eq!(a.image_url(), Some("/uploads/blogs/blog-17-42.jpg"));
        assert_eq!(a.pdf_url(), None);
    }

    #[test]
    fn pdf_attachment_exposes_only_pdf_url() {
        let a = Attachment {
            file_url: Some("https://media.example.com/raw/upload/v1/careers/spec.pdf".to_string()),
            file_type: FileKind::Pdf,
            original_file_name: Some("spec.pdf".to_string()),
            display_size: Some("2.4 MB".to_string()),
        };
        assert_eq!(a.image_url(), None);
        assert!(a.pdf_url().is_some());
    }

    #[test]
    fn display_size_formats_by_magnitude() {
        assert_eq!(format_display_size(512), "512 B");
        assert_eq!(format_display_size(350 * 1024), "350 KB");
        assert_eq!(format_display_size(2_516_582), "2.4 MB");
    }
}
