use gazette_core::{models::GalleryImage, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::{map_db_error, Page};

const IMAGE_COLUMNS: &str = "id, title, alt_text, image_url, original_file_name, display_size, \
                             created_at, updated_at";

/// Repository for gallery images
#[derive(Clone)]
pub struct GalleryImageRepository {
    pool: PgPool,
}

impl GalleryImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "gallery_images", db.operation = "insert"))]
    pub async fn create(
        &self,
        title: &str,
        alt_text: Option<&str>,
        image_url: &str,
        original_file_name: Option<&str>,
        display_size: Option<&str>,
    ) -> Result<GalleryImage, AppError> {
        let image = sqlx::query_as::<Postgres, GalleryImage>(&format!(
            r#"
            INSERT INTO gallery_images (title, alt_text, image_url, original_file_name, display_size)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            IMAGE_COLUMNS
        ))
        .bind(title)
        .bind(alt_text)
        .bind(image_url)
        .bind(original_file_name)
        .bind(display_size)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(image)
    }

    #[tracing::instrument(skip(self), fields(db.table = "gallery_images", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<GalleryImage>, AppError> {
        let image = sqlx::query_as::<Postgres, GalleryImage>(&format!(
            "SELECT {} FROM gallery_images WHERE id = $1",
            IMAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    #[tracing::instrument(skip(self), fields(db.table = "gallery_images", db.operation = "select"))]
    pub async fn list(&self, page: Page) -> Result<Vec<GalleryImage>, AppError> {
        let images = sqlx::query_as::<Postgres, GalleryImage>(&format!(
            "SELECT {} FROM gallery_images ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            IMAGE_COLUMNS
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// Persist the full merged state of a gallery image.
    #[tracing::instrument(skip(self, image), fields(db.table = "gallery_images", db.operation = "update", db.record_id = %image.id))]
    pub async fn update(&self, image: &GalleryImage) -> Result<GalleryImage, AppError> {
        let updated = sqlx::query_as::<Postgres, GalleryImage>(&format!(
            r#"
            UPDATE gallery_images
            SET title = $2, alt_text = $3, image_url = $4, original_file_name = $5,
                display_size = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            IMAGE_COLUMNS
        ))
        .bind(image.id)
        .bind(&image.title)
        .bind(&image.alt_text)
        .bind(&image.image_url)
        .bind(&image.original_file_name)
        .bind(&image.display_size)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        updated.ok_or_else(|| AppError::NotFound(format!("Gallery image {} not found", image.id)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "gallery_images", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<GalleryImage>, AppError> {
        let deleted = sqlx::query_as::<Postgres, GalleryImage>(&format!(
            "DELETE FROM gallery_images WHERE id = $1 RETURNING {}",
            IMAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
