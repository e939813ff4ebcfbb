use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::attachment::{Attachment, FileKind};

/// Blog post with an optional cover image or PDF attachment
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author: String,
    pub published: bool,
    pub file_url: Option<String>,
    pub file_type: FileKind,
    pub original_file_name: Option<String>,
    pub display_size: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn attachment(&self) -> Attachment {
        Attachment {
            file_url: self.file_url.clone(),
            file_type: self.file_type,
            original_file_name: self.original_file_name.clone(),
            display_size: self.display_size.clone(),
        }
    }
}

/// Request DTO for creating a blog post. The file itself arrives as a
/// separate multipart part; these are the form's text fields.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Slug must be between 1 and 200 characters"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(
        min = 1,
        max = 120,
        message = "Author must be between 1 and 120 characters"
    ))]
    pub author: String,
    #[serde(default)]
    pub published: bool,
}

/// Request DTO for updating a blog post
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Slug must be between 1 and 200 characters"))]
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 120,
        message = "Author must be between 1 and 120 characters"
    ))]
    pub author: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    /// Clear the current attachment without providing a replacement.
    #[serde(default)]
    pub remove_file: bool,
}

/// Blog response with derived attachment URLs
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author: String,
    pub published: bool,
    pub file_url: Option<String>,
    pub file_type: FileKind,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub original_file_name: Option<String>,
    pub display_size: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        let attachment = blog.attachment();
        BlogResponse {
            image_url: attachment.image_url().map(str::to_string),
            pdf_url: attachment.pdf_url().map(str::to_string),
            id: blog.id,
            title: blog.title,
            slug: blog.slug,
            content: blog.content,
            author: blog.author,
            published: blog.published,
            file_url: blog.file_url,
            file_type: blog.file_type,
            original_file_name: blog.original_file_name,
            display_size: blog.display_size,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_blog(file_url: Option<&str>, file_type: FileKind) -> Blog {
        Blog {
            id: Uuid::new_v4(),
            title: "Launch notes".to_string(),
            slug: "launch-notes".to_string(),
            content: "Body".to_string(),
            author: "Ana".to_string(),
            published: true,
            file_url: file_url.map(str::to_string),
            file_type,
            original_file_name: file_url.map(|_| "cover.jpg".to_string()),
            display_size: file_url.map(|_| "1.2 MB".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn response_derives_exactly_one_url_for_image() {
        let response = BlogResponse::from(sample_blog(
            Some("https://media.example.com/image/upload/v1/blogs/a.jpg"),
            FileKind::Image,
        ));
        assert!(response.image_url.is_some());
        assert!(response.pdf_url.is_none());
    }

    #[test]
    fn response_derives_exactly_one_url_for_pdf() {
        let response = BlogResponse::from(sample_blog(
            Some("/uploads/blogs/blog-17-42.pdf"),
            FileKind::Pdf,
        ));
        assert!(response.image_url.is_none());
        assert!(response.pdf_url.is_some());
    }

    #[test]
    fn response_has_no_urls_without_attachment() {
        let response = BlogResponse::from(sample_blog(None, FileKind::None));
        assert!(response.image_url.is_none());
        assert!(response.pdf_url.is_none());
        assert!(response.file_url.is_none());
    }
}
