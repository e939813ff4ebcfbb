//! Blog post endpoints.
//!
//! Create and update take `multipart/form-data` with a JSON `payload` part
//! and an optional `file` part (image or PDF). The file is stored before
//! the row is written; a failed write removes the freshly stored file, and
//! a replaced file is removed only after the new row state is durable.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use gazette_core::models::{Blog, BlogResponse, CreateBlogRequest, UpdateBlogRequest};
use gazette_core::AppError;
use gazette_db::Page;
use gazette_storage::EntityFolder;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::attachment::{
    cleanup_replaced, next_attachment, persist_with_cleanup, stage_attachment,
};
use crate::state::{DbState, UploadState};
use crate::utils::upload::{
    extract_upload, parse_optional_payload, parse_required_payload, slugify,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBlogsQuery {
    /// Max rows to return (1-100, default 20)
    pub limit: Option<i64>,
    /// Rows to skip
    pub offset: Option<i64>,
    /// Only return published posts
    #[serde(default)]
    pub published: bool,
}

#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = "blogs",
    params(ListBlogsQuery),
    responses(
        (status = 200, description = "Blog posts, newest first", body = Vec<BlogResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_blogs(
    State(db): State<DbState>,
    Query(query): Query<ListBlogsQuery>,
) -> Result<Json<Vec<BlogResponse>>, HttpAppError> {
    let page = Page::new(query.limit, query.offset);
    let blogs = db.blogs.list(page, query.published).await?;

    Ok(Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    tag = "blogs",
    params(("id" = Uuid, Path, description = "Blog id")),
    responses(
        (status = 200, description = "Blog post", body = BlogResponse),
        (status = 404, description = "Blog not found", body = ErrorResponse)
    )
)]
pub async fn get_blog(
    State(db): State<DbState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BlogResponse>, HttpAppError> {
    let blog = db
        .blogs
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog {} not found", id)))?;

    Ok(Json(blog.into()))
}

#[utoipa::path(
    get,
    path = "/api/blogs/slug/{slug}",
    tag = "blogs",
    params(("slug" = String, Path, description = "Blog slug")),
    responses(
        (status = 200, description = "Blog post", body = BlogResponse),
        (status = 404, description = "Blog not found", body = ErrorResponse)
    )
)]
pub async fn get_blog_by_slug(
    State(db): State<DbState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogResponse>, HttpAppError> {
    let blog = db
        .blogs
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog '{}' not found", slug)))?;

    Ok(Json(blog.into()))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    tag = "blogs",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "A 'payload' part with CreateBlogRequest JSON and an optional 'file' part (image or PDF)"),
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Invalid payload or file", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_blog(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<BlogResponse>), HttpAppError> {
    let form = extract_upload(multipart).await?;
    let request: CreateBlogRequest = parse_required_payload(form.payload)?;
    let slug = request
        .slug
        .clone()
        .unwrap_or_else(|| slugify(&request.title));

    let staged = match form.file {
        Some(file) => Some(
            stage_attachment(
                uploads.storage.as_ref(),
                file,
                EntityFolder::Blogs,
                uploads.attachment_policy(),
            )
            .await?,
        ),
        None => None,
    };
    let attachment = staged.clone().unwrap_or_default();

    let blog = persist_with_cleanup(
        uploads.storage.as_ref(),
        staged.as_ref(),
        db.blogs.create(
            &request.title,
            &slug,
            &request.content,
            &request.author,
            request.published,
            &attachment,
        ),
    )
    .await?;

    tracing::info!(blog_id = %blog.id, slug = %blog.slug, "Blog created");
    Ok((StatusCode::CREATED, Json(blog.into())))
}

#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    tag = "blogs",
    params(("id" = Uuid, Path, description = "Blog id")),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "An optional 'payload' part with UpdateBlogRequest JSON and an optional 'file' part replacing the attachment"),
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Invalid payload or file", body = ErrorResponse),
        (status = 404, description = "Blog not found", body = ErrorResponse)
    )
)]
pub async fn update_blog(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<BlogResponse>, HttpAppError> {
    let current = db
        .blogs
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog {} not found", id)))?;

    let form = extract_upload(multipart).await?;
    let request: UpdateBlogRequest = parse_optional_payload(form.payload)?;

    let staged = match form.file {
        Some(file) => Some(
            stage_attachment(
                uploads.storage.as_ref(),
                file,
                EntityFolder::Blogs,
                uploads.attachment_policy(),
            )
            .await?,
        ),
        None => None,
    };

    let previous = current.attachment();
    let attachment = next_attachment(previous.clone(), staged.clone(), request.remove_file);

    let merged = Blog {
        id: current.id,
        title: request.title.unwrap_or(current.title),
        slug: request.slug.unwrap_or(current.slug),
        content: request.content.unwrap_or(current.content),
        author: request.author.unwrap_or(current.author),
        published: request.published.unwrap_or(current.published),
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
        db.blogs.update(&merged),
    )
    .await?;

    cleanup_replaced(uploads.storage.as_ref(), &previous, &updated.attachment()).await;

    tracing::info!(blog_id = %updated.id, "Blog updated");
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    tag = "blogs",
    params(("id" = Uuid, Path, description = "Blog id")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 404, description = "Blog not found", body = ErrorResponse)
    )
)]
pub async fn delete_blog(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let deleted = db
        .blogs
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog {} not found", id)))?;

    if let Some(reference) = deleted.file_url.as_deref() {
        uploads.storage.remove(reference).await;
    }

    tracing::info!(blog_id = %id, "Blog deleted");
    Ok(StatusCode::NO_CONTENT)
}
