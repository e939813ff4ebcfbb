use gazette_core::{
    models::{Attachment, Blog},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::{map_db_error, Page};

const BLOG_COLUMNS: &str = "id, title, slug, content, author, published, file_url, file_type, \
                            original_file_name, display_size, created_at, updated_at";

/// Repository for blog posts
#[derive(Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "blogs", db.operation = "insert"))]
    pub async fn create(
        &self,
        title: &str,
        slug: &str,
        content: &str,
        author: &str,
        published: bool,
        attachment: &Attachment,
    ) -> Result<Blog, AppError> {
        let blog = sqlx::query_as::<Postgres, Blog>(&format!(
            r#"
            INSERT INTO blogs (title, slug, content, author, published, file_url, file_type, original_file_name, display_size)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(title)
        .bind(slug)
        .bind(content)
        .bind(author)
        .bind(published)
        .bind(&attachment.file_url)
        .bind(attachment.file_type)
        .bind(&attachment.original_file_name)
        .bind(&attachment.display_size)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(blog)
    }

    #[tracing::instrument(skip(self), fields(db.table = "blogs", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Blog>, AppError> {
        let blog = sqlx::query_as::<Postgres, Blog>(&format!(
            "SELECT {} FROM blogs WHERE id = $1",
            BLOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(blog)
    }

    #[tracing::instrument(skip(self), fields(db.table = "blogs", db.operation = "select"))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Blog>, AppError> {
        let blog = sqlx::query_as::<Postgres, Blog>(&format!(
            "SELECT {} FROM blogs WHERE slug = $1",
            BLOG_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(blog)
    }

    /// List blogs, newest first, optionally restricted to published posts.
    #[tracing::instrument(skip(self), fields(db.table = "blogs", db.operation = "select"))]
    pub async fn list(&self, page: Page, published_only: bool) -> Result<Vec<Blog>, AppError> {
        let blogs = if published_only {
            sqlx::query_as::<Postgres, Blog>(&format!(
                "SELECT {} FROM blogs WHERE published = TRUE ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                BLOG_COLUMNS
            ))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<Postgres, Blog>(&format!(
                "SELECT {} FROM blogs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                BLOG_COLUMNS
            ))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(blogs)
    }

    /// Persist the full merged state of a blog. The caller merges request
    /// fields and the attachment decision first so the new reference and the
    /// cleared old fields land in one statement.
    #[tracing::instrument(skip(self, blog), fields(db.table = "blogs", db.operation = "update", db.record_id = %blog.id))]
    pub async fn update(&self, blog: &Blog) -> Result<Blog, AppError> {
        let updated = sqlx::query_as::<Postgres, Blog>(&format!(
            r#"
            UPDATE blogs
            SET title = $2, slug = $3, content = $4, author = $5, published = $6,
                file_url = $7, file_type = $8, original_file_name = $9, display_size = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.slug)
        .bind(&blog.content)
        .bind(&blog.author)
        .bind(blog.published)
        .bind(&blog.file_url)
        .bind(blog.file_type)
        .bind(&blog.original_file_name)
        .bind(&blog.display_size)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        updated.ok_or_else(|| AppError::NotFound(format!("Blog {} not found", blog.id)))
    }

    /// Delete a blog, returning the removed row so the caller can clean up
    /// its attachment.
    #[tracing::instrument(skip(self), fields(db.table = "blogs", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Blog>, AppError> {
        let deleted = sqlx::query_as::<Postgres, Blog>(&format!(
            "DELETE FROM blogs WHERE id = $1 RETURNING {}",
            BLOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
