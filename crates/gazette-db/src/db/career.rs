use gazette_core::{
    models::{Attachment, Career, EmploymentType},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::{map_db_error, Page};

const CAREER_COLUMNS: &str = "id, title, description, location, employment_type, open, file_url, \
                              file_type, original_file_name, display_size, created_at, updated_at";

/// Repository for career postings
#[derive(Clone)]
pub struct CareerRepository {
    pool: PgPool,
}

impl CareerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "careers", db.operation = "insert"))]
    pub async fn create(
        &self,
        title: &str,
        description: &str,
        location: Option<&str>,
        employment_type: EmploymentType,
        open: bool,
        attachment: &Attachment,
    ) -> Result<Career, AppError> {
        let career = sqlx::query_as::<Postgres, Career>(&format!(
            r#"
            INSERT INTO careers (title, description, location, employment_type, open, file_url, file_type, original_file_name, display_size)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            CAREER_COLUMNS
        ))
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(employment_type)
        .bind(open)
        .bind(&attachment.file_url)
        .bind(attachment.file_type)
        .bind(&attachment.original_file_name)
        .bind(&attachment.display_size)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(career)
    }

    #[tracing::instrument(skip(self), fields(db.table = "careers", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Career>, AppError> {
        let career = sqlx::query_as::<Postgres, Career>(&format!(
            "SELECT {} FROM careers WHERE id = $1",
            CAREER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(career)
    }

    /// List postings, newest first, optionally only open ones.
    #[tracing::instrument(skip(self), fields(db.table = "careers", db.operation = "select"))]
    pub async fn list(&self, page: Page, open_only: bool) -> Result<Vec<Career>, AppError> {
        let careers = if open_only {
            sqlx::query_as::<Postgres, Career>(&format!(
                "SELECT {} FROM careers WHERE open = TRUE ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                CAREER_COLUMNS
            ))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<Postgres, Career>(&format!(
                "SELECT {} FROM careers ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                CAREER_COLUMNS
            ))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(careers)
    }

    /// Persist the full merged state of a career posting.
    #[tracing::instrument(skip(self, career), fields(db.table = "careers", db.operation = "update", db.record_id = %career.id))]
    pub async fn update(&self, career: &Career) -> Result<Career, AppError> {
        let updated = sqlx::query_as::<Postgres, Career>(&format!(
            r#"
            UPDATE careers
            SET title = $2, description = $3, location = $4, employment_type = $5, open = $6,
                file_url = $7, file_type = $8, original_file_name = $9, display_size = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CAREER_COLUMNS
        ))
        .bind(career.id)
        .bind(&career.title)
        .bind(&career.description)
        .bind(&career.location)
        .bind(career.employment_type)
        .bind(career.open)
        .bind(&career.file_url)
        .bind(career.file_type)
        .bind(&career.original_file_name)
        .bind(&career.display_size)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        updated.ok_or_else(|| AppError::NotFound(format!("Career {} not found", career.id)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "careers", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Career>, AppError> {
        let deleted = sqlx::query_as::<Postgres, Career>(&format!(
            "DELETE FROM careers WHERE id = $1 RETURNING {}",
            CAREER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
