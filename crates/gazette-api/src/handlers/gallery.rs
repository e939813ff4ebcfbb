//! Gallery image endpoints. Unlike the other entities the image is required
//! on create and can only be replaced, never cleared, on update.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use gazette_core::models::{
    CreateGalleryImageRequest, GalleryImage, GalleryImageResponse, UpdateGalleryImageRequest,
};
use gazette_core::AppError;
use gazette_db::Page;
use gazette_storage::EntityFolder;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::attachment::{persist_with_cleanup, stage_attachment};
use crate::state::{DbState, UploadState};
use crate::utils::upload::{extract_upload, parse_optional_payload, parse_required_payload};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListGalleryQuery {
    /// Max rows to return (1-100, default 20)
    pub limit: Option<i64>,
    /// Rows to skip
    pub offset: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/gallery",
    tag = "gallery",
    params(ListGalleryQuery),
    responses(
        (status = 200, description = "Gallery images, newest first", body = Vec<GalleryImageResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_gallery_images(
    State(db): State<DbState>,
    Query(query): Query<ListGalleryQuery>,
) -> Result<Json<Vec<GalleryImageResponse>>, HttpAppError> {
    let page = Page::new(query.limit, query.offset);
    let images = db.gallery_images.list(page).await?;

    Ok(Json(
        images.into_iter().map(GalleryImageResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/gallery/{id}",
    tag = "gallery",
    params(("id" = Uuid, Path, description = "Gallery image id")),
    responses(
        (status = 200, description = "Gallery image", body = GalleryImageResponse),
        (status = 404, description = "Gallery image not found", body = ErrorResponse)
    )
)]
pub async fn get_gallery_image(
    State(db): State<DbState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GalleryImageResponse>, HttpAppError> {
    let image = db
        .gallery_images
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gallery image {} not found", id)))?;

    Ok(Json(image.into()))
}

#[utoipa::path(
    post,
    path = "/api/gallery",
    tag = "gallery",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "A 'payload' part with CreateGalleryImageRequest JSON and a required 'file' part (image only)"),
    responses(
        (status = 201, description = "Gallery image created", body = GalleryImageResponse),
        (status = 400, description = "Invalid payload or file", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_gallery_image(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<GalleryImageResponse>), HttpAppError> {
    let form = extract_upload(multipart).await?;
    let request: CreateGalleryImageRequest = parse_required_payload(form.payload)?;

    let file = form.file.ok_or_else(|| {
        AppError::InvalidInput("Gallery images require a 'file' form field".to_string())
    })?;

    let staged = stage_attachment(
        uploads.storage.as_ref(),
        file,
        EntityFolder::Gallery,
        uploads.image_policy(),
    )
    .await?;
    let image_url = staged
        .file_url
        .clone()
        .ok_or_else(|| AppError::Internal("Stored image has no reference".to_string()))?;

    let image = persist_with_cleanup(
        uploads.storage.as_ref(),
        Some(&staged),
        db.gallery_images.create(
            &request.title,
            request.alt_text.as_deref(),
            &image_url,
            staged.original_file_name.as_deref(),
            staged.display_size.as_deref(),
        ),
    )
    .await?;

    tracing::info!(image_id = %image.id, "Gallery image created");
    Ok((StatusCode::CREATED, Json(image.into())))
}

#[utoipa::path(
    put,
    path = "/api/gallery/{id}",
    tag = "gallery",
    params(("id" = Uuid, Path, description = "Gallery image id")),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "An optional 'payload' part with UpdateGalleryImageRequest JSON and an optional 'file' part replacing the image"),
    responses(
        (status = 200, description = "Gallery image updated", body = GalleryImageResponse),
        (status = 400, description = "Invalid payload or file", body = ErrorResponse),
        (status = 404, description = "Gallery image not found", body = ErrorResponse)
    )
)]
pub async fn update_gallery_image(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<GalleryImageResponse>, HttpAppError> {
    let current = db
        .gallery_images
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gallery image {} not found", id)))?;

    let form = extract_upload(multipart).await?;
    let request: UpdateGalleryImageRequest = parse_optional_payload(form.payload)?;

    let staged = match form.file {
        Some(file) => Some(
            stage_attachment(
                uploads.storage.as_ref(),
                file,
                EntityFolder::Gallery,
                uploads.image_policy(),
            )
            .await?,
        ),
        None => None,
    };

    let previous_url = current.image_url.clone();
    let (image_url, original_file_name, display_size) = match &staged {
        Some(attachment) => (
            attachment
                .file_url
                .clone()
                .unwrap_or_else(|| current.image_url.clone()),
            attachment.original_file_name.clone(),
            attachment.display_size.clone(),
        ),
        None => (
            current.image_url.clone(),
            current.original_file_name.clone(),
            current.display_size.clone(),
        ),
    };

    let merged = GalleryImage {
        id: current.id,
        title: request.title.unwrap_or(current.title),
        alt_text: request.alt_text.or(current.alt_text),
        image_url,
        original_file_name,
        display_size,
        created_at: current.created_at,
        updated_at: current.updated_at,
    };

    let updated = persist_with_cleanup(
        uploads.storage.as_ref(),
        staged.as_ref(),
        db.gallery_images.update(&merged),
    )
    .await?;

    // Replacement is durable, the old image can go.
    if staged.is_some() && updated.image_url != previous_url {
        uploads.storage.remove(&previous_url).await;
    }

    tracing::info!(image_id = %updated.id, "Gallery image updated");
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/gallery/{id}",
    tag = "gallery",
    params(("id" = Uuid, Path, description = "Gallery image id")),
    responses(
        (status = 204, description = "Gallery image deleted"),
        (status = 404, description = "Gallery image not found", body = ErrorResponse)
    )
)]
pub async fn delete_gallery_image(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let deleted = db
        .gallery_images
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gallery image {} not found", id)))?;

    uploads.storage.remove(&deleted.image_url).await;

    tracing::info!(image_id = %id, "Gallery image deleted");
    Ok(StatusCode::NO_CONTENT)
}
