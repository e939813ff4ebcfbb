use chrono::{DateTime, Utc};
use gazette_core::{
    models::{Attachment, Event},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::{map_db_error, Page};

const EVENT_COLUMNS: &str = "id, title, description, location, starts_at, ends_at, file_url, \
                             file_type, original_file_name, display_size, created_at, updated_at";

/// Repository for events
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "events", db.operation = "insert"))]
    pub async fn create(
        &self,
        title: &str,
        description: &str,
        location: Option<&str>,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        attachment: &Attachment,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<Postgres, Event>(&format!(
            r#"
            INSERT INTO events (title, description, location, starts_at, ends_at, file_url, file_type, original_file_name, display_size)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(starts_at)
        .bind(ends_at)
        .bind(&attachment.file_url)
        .bind(attachment.file_type)
        .bind(&attachment.original_file_name)
        .bind(&attachment.display_size)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(event)
    }

    #[tracing::instrument(skip(self), fields(db.table = "events", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<Postgres, Event>(&format!(
            "SELECT {} FROM events WHERE id = $1",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// List events ordered by start time, optionally only upcoming ones.
    #[tracing::instrument(skip(self), fields(db.table = "events", db.operation = "select"))]
    pub async fn list(&self, page: Page, upcoming_only: bool) -> Result<Vec<Event>, AppError> {
        let events = if upcoming_only {
            sqlx::query_as::<Postgres, Event>(&format!(
                "SELECT {} FROM events WHERE starts_at >= NOW() ORDER BY starts_at ASC LIMIT $1 OFFSET $2",
                EVENT_COLUMNS
            ))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<Postgres, Event>(&format!(
                "SELECT {} FROM events ORDER BY starts_at DESC LIMIT $1 OFFSET $2",
                EVENT_COLUMNS
            ))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(events)
    }

    /// Persist the full merged state of an event.
    #[tracing::instrument(skip(self, event), fields(db.table = "events", db.operation = "update", db.record_id = %event.id))]
    pub async fn update(&self, event: &Event) -> Result<Event, AppError> {
        let updated = sqlx::query_as::<Postgres, Event>(&format!(
            r#"
            UPDATE events
            SET title = $2, description = $3, location = $4, starts_at = $5, ends_at = $6,
                file_url = $7, file_type = $8, original_file_name = $9, display_size = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(&event.file_url)
        .bind(event.file_type)
        .bind(&event.original_file_name)
        .bind(&event.display_size)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        updated.ok_or_else(|| AppError::NotFound(format!("Event {} not found", event.id)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "events", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        let deleted = sqlx::query_as::<Postgres, Event>(&format!(
            "DELETE FROM events WHERE id = $1 RETURNING {}",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
