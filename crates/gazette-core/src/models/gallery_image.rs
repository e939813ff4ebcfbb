use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Gallery image. Unlike the other entities this one is image-only and the
/// file is required, so there is no attachment kind to track.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GalleryImage {
    pub id: Uuid,
    pub title: String,
    pub alt_text: Option<String>,
    pub image_url: String,
    pub original_file_name: Option<String>,
    pub display_size: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryImageRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 300, message = "Alt text must be at most 300 characters"))]
    pub alt_text: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryImageRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(max = 300, message = "Alt text must be at most 300 characters"))]
    pub alt_text: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageResponse {
    pub id: Uuid,
    pub title: String,
    pub alt_text: Option<String>,
    pub image_url: String,
    pub original_file_name: Option<String>,
    pub display_size: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GalleryImage> for GalleryImageResponse {
    fn from(image: GalleryImage) -> Self {
        GalleryImageResponse {
            id: image.id,
            title: image.title,
            alt_text: image.alt_text,
            image_url: image.image_url,
            original_file_name: image.original_file_name,
            display_size: image.display_size,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}
