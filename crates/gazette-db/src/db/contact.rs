use gazette_core::{models::ContactMessage, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::{map_db_error, Page};

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, created_at";

/// Repository for contact-form submissions
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, message), fields(db.table = "contact_messages", db.operation = "insert"))]
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<ContactMessage, AppError> {
        let saved = sqlx::query_as::<Postgres, ContactMessage>(&format!(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CONTACT_COLUMNS
        ))
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(saved)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_messages", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<ContactMessage>, AppError> {
        let message = sqlx::query_as::<Postgres, ContactMessage>(&format!(
            "SELECT {} FROM contact_messages WHERE id = $1",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_messages", db.operation = "select"))]
    pub async fn list(&self, page: Page) -> Result<Vec<ContactMessage>, AppError> {
        let messages = sqlx::query_as::<Postgres, ContactMessage>(&format!(
            "SELECT {} FROM contact_messages ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            CONTACT_COLUMNS
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_messages", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
