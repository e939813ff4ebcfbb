//! Career posting endpoints. The attachment is the job description, most
//! often a PDF.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use gazette_core::models::{Career, CareerResponse, CreateCareerRequest, UpdateCareerRequest};
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
pub struct ListCareersQuery {
    /// Max rows to return (1-100, default 20)
    pub limit: Option<i64>,
    /// Rows to skip
    pub offset: Option<i64>,
    /// Only return postings still accepting applications
    #[serde(default)]
    pub open: bool,
}

#[utoipa::path(
    get,
    path = "/api/careers",
    tag = "careers",
    params(ListCareersQuery),
    responses(
        (status = 200, description = "Career postings, newest first", body = Vec<CareerResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_careers(
    State(db): State<DbState>,
    Query(query): Query<ListCareersQuery>,
) -> Result<Json<Vec<CareerResponse>>, HttpAppError> {
    let page = Page::new(query.limit, query.offset);
    let careers = db.careers.list(page, query.open).await?;

    Ok(Json(careers.into_iter().map(CareerResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/careers/{id}",
    tag = "careers",
    params(("id" = Uuid, Path, description = "Career id")),
    responses(
        (status = 200, description = "Career posting", body = CareerResponse),
        (status = 404, description = "Career not found", body = ErrorResponse)
    )
)]
pub async fn get_career(
    State(db): State<DbState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CareerResponse>, HttpAppError> {
    let career = db
        .careers
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Career {} not found", id)))?;

    Ok(Json(career.into()))
}

#[utoipa::path(
    post,
    path = "/api/careers",
    tag = "careers",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "A 'payload' part with CreateCareerRequest JSON and an optional 'file' part (image or PDF)"),
    responses(
        (status = 201, description = "Career created", body = CareerResponse),
        (status = 400, description = "Invalid payload or file", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_career(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CareerResponse>), HttpAppError> {
    let form = extract_upload(multipart).await?;
    let request: CreateCareerRequest = parse_required_payload(form.payload)?;

    let staged = match form.file {
        Some(file) => Some(
            stage_attachment(
                uploads.storage.as_ref(),
                file,
                EntityFolder::Careers,
                uploads.attachment_policy(),
            )
            .await?,
        ),
        None => None,
    };
    let attachment = staged.clone().unwrap_or_default();

    let career = persist_with_cleanup(
        uploads.storage.as_ref(),
        staged.as_ref(),
        db.careers.create(
            &request.title,
            &request.description,
            request.location.as_deref(),
            request.employment_type,
            request.open,
            &attachment,
        ),
    )
    .await?;

    tracing::info!(career_id = %career.id, "Career created");
    Ok((StatusCode::CREATED, Json(career.into())))
}

#[utoipa::path(
    put,
    path = "/api/careers/{id}",
    tag = "careers",
    params(("id" = Uuid, Path, description = "Career id")),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "An optional 'payload' part with UpdateCareerRequest JSON and an optional 'file' part replacing the job description"),
    responses(
        (status = 200, description = "Career updated", body = CareerResponse),
        (status = 400, description = "Invalid payload or file", body = ErrorResponse),
        (status = 404, description = "Career not found", body = ErrorResponse)
    )
)]
pub async fn update_career(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<CareerResponse>, HttpAppError> {
    let current = db
        .careers
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Career {} not found", id)))?;

    let form = extract_upload(multipart).await?;
    let request: UpdateCareerRequest = parse_optional_payload(form.payload)?;

    let staged = match form.file {
        Some(file) => Some(
            stage_attachment(
                uploads.storage.as_ref(),
                file,
                EntityFolder::Careers,
                uploads.attachment_policy(),
            )
            .await?,
        ),
        None => None,
    };

    let previous = current.attachment();
    let attachment = next_attachment(previous.clone(), staged.clone(), request.remove_file);

    let merged = Career {
        id: current.id,
        title: request.title.unwrap_or(current.title),
        description: request.description.unwrap_or(current.description),
        location: request.location.or(current.location),
        employment_type: request.employment_type.unwrap_or(current.employment_type),
        open: request.open.unwrap_or(current.open),
        file_url: attachment.file_url.clone(),
        file_type: attachment.file_type,
        original_file_name: attachment.original_file_name.clone(),
        display_size: attachment.display_size.clone(),
        created_at: current.created_at,
        updated_at: current.updated_at,
    };

    let updated = persist_with_cleanup(
        uploads.storage.as_ref(),
        staged.as_ref(),
        db.careers.update(&merged),
    )
    .await?;

    cleanup_replaced(uploads.storage.as_ref(), &previous, &updated.attachment()).await;

    tracing::info!(career_id = %updated.id, "Career updated");
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/careers/{id}",
    tag = "careers",
    params(("id" = Uuid, Path, description = "Career id")),
    responses(
        (status = 204, description = "Career deleted"),
        (status = 404, description = "Career not found", body = ErrorResponse)
    )
)]
pub async fn delete_career(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let deleted = db
        .careers
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Career {} not found", id)))?;

    if let Some(reference) = deleted.file_url.as_deref() {
        uploads.storage.remove(reference).await;
    }

    tracing::info!(career_id = %id, "Career deleted");
    Ok(StatusCode::NO_CONTENT)
}
