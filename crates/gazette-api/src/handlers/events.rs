//! Event endpoints. Same multipart convention and attachment lifecycle as
//! the blog endpoints; the attachment here is the event flyer.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use gazette_core::models::{CreateEventRequest, Event, EventResponse, UpdateEventRequest};
use gazette_core::AppError;
use gazette_db::Page;
use gazette_storage::EntityFolder;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::attachment::{
    cleanup_replaced, next_attachment, persist_with_cleanup, stage_attachment,
};
use crate::state::{DbState, UploadState};
use crate::utils::upload::{extract_upload, parse_optional_payload, parse_required_payload};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListEventsQuery {
    /// Max rows to return (1-100, default 20)
    pub limit: Option<i64>,
    /// Rows to skip
    pub offset: Option<i64>,
    /// Only return events that have not started yet
    #[serde(default)]
    pub upcoming: bool,
}

#[utoipa::path(
    get,
    path = "/api/events",
    tag = "events",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "Events ordered by start time", body = Vec<EventResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_events(
    State(db): State<DbState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<EventResponse>>, HttpAppError> {
    let page = Page::new(query.limit, query.offset);
    let events = db.events.list(page, query.upcoming).await?;

    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
pub async fn get_event(
    State(db): State<DbState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, HttpAppError> {
    let event = db
        .events
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))?;

    Ok(Json(event.into()))
}

#[utoipa::path(
    post,
    path = "/api/events",
    tag = "events",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "A 'payload' part with CreateEventRequest JSON and an optional 'file' part (image or PDF)"),
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid payload or file", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_event(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<EventResponse>), HttpAppError> {
    let form = extract_upload(multipart).await?;
    let request: CreateEventRequest = parse_required_payload(form.payload)?;

    if let Some(ends_at) = request.ends_at {
        if ends_at < request.starts_at {
            return Err(AppError::InvalidInput(
                "Event end time must not be before its start time".to_string(),
            )
            .into());
        }
    }

    let staged = match form.file {
        Some(file) => Some(
            stage_attachment(
                uploads.storage.as_ref(),
                file,
                EntityFolder::Events,
                uploads.attachment_policy(),
            )
            .await?,
        ),
        None => None,
    };
    let attachment = staged.clone().unwrap_or_default();

    let event = persist_with_cleanup(
        uploads.storage.as_ref(),
        staged.as_ref(),
        db.events.create(
            &request.title,
            &request.description,
            request.location.as_deref(),
            request.starts_at,
            request.ends_at,
            &attachment,
        ),
    )
    .await?;

    tracing::info!(event_id = %event.id, "Event created");
    Ok((StatusCode::CREATED, Json(event.into())))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "An optional 'payload' part with UpdateEventRequest JSON and an optional 'file' part replacing the flyer"),
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Invalid payload or file", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
pub async fn update_event(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<EventResponse>, HttpAppError> {
    let current = db
        .events
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))?;

    let form = extract_upload(multipart).await?;
    let request: UpdateEventRequest = parse_optional_payload(form.payload)?;

    let staged = match form.file {
        Some(file) => Some(
            stage_attachment(
                uploads.storage.as_ref(),
                file,
                EntityFolder::Events,
                uploads.attachment_policy(),
            )
            .await?,
        ),
        None => None,
    };

    let previous = current.attachment();
    let attachment = next_attachment(previous.clone(), staged.clone(), request.remove_file);

    let merged = Event {
        id: current.id,
        title: request.title.unwrap_or(current.title),
        description: request.description.unwrap_or(current.description),
        location: request.location.or(current.location),
        starts_at: request.starts_at.unwrap_or(current.starts_at),
        ends_at: request.ends_at.or(current.ends_at),
        file_url: attachment.file_url.clone(),
        file_type: attachment.file_type,
        original_file_name: attachment.original_file_name.clone(),
        display_size: attachment.display_size.clone(),
        created_at: current.created_at,
        updated_at: current.updated_at,
    };

    if let Some(ends_at) = merged.ends_at {
        if ends_at < merged.starts_at {
            // Orphan cleanup still applies: the replacement upload must not
            // survive a rejected update.
            if let Some(reference) = staged.as_ref().and_then(|a| a.file_url.as_deref()) {
                uploads.storage.remove(reference).await;
            }
            return Err(AppError::InvalidInput(
                "Event end time must not be before its start time".to_string(),
            )
            .into());
        }
    }

    let updated = persist_with_cleanup(
        uploads.storage.as_ref(),
        staged.as_ref(),
        db.events.update(&merged),
    )
    .await?;

    cleanup_replaced(uploads.storage.as_ref(), &previous, &updated.attachment()).await;

    tracing::info!(event_id = %updated.id, "Event updated");
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
pub async fn delete_event(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let deleted = db
        .events
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))?;

    if let Some(reference) = deleted.file_url.as_deref() {
        uploads.storage.remove(reference).await;
    }

    tracing::info!(event_id = %id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}
