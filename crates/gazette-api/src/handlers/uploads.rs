//! Serves locally stored uploads back over HTTP.
//!
//! Only used when the local backend holds files; remote-backed attachments
//! carry absolute URLs that never hit this route. Generated filenames are
//! unique, so images get a long immutable cache lifetime.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::fs;

use gazette_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::UploadState;

const IMAGE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
const DOCUMENT_CACHE_CONTROL: &str = "public, max-age=3600";

#[utoipa::path(
    get,
    path = "/uploads/{folder}/{filename}",
    tag = "uploads",
    params(
        ("folder" = String, Path, description = "Entity folder, e.g. blogs"),
        ("filename" = String, Path, description = "Stored filename")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 400, description = "Invalid path", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn serve_upload(
    State(uploads): State<UploadState>,
    Path((folder, filename)): Path<(String, String)>,
) -> Result<Response, HttpAppError> {
    let path = uploads.local.resolve(&folder, &filename)?;

    let data = match fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "File {}/{} not found",
                folder, filename
            ))
            .into());
        }
        Err(e) => return Err(AppError::from(e).into()),
    };

    let content_type = content_type_for(&filename);
    let cache_control = if content_type.starts_with("image/") {
        IMAGE_CACHE_CONTROL
    } else {
        DOCUMENT_CACHE_CONTROL
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, cache_control),
        ],
        data,
    )
        .into_response())
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_covers_served_formats() {
        assert_eq!(content_type_for("blog-1-2.JPG"), "image/jpeg");
        assert_eq!(content_type_for("career-3-4.pdf"), "application/pdf");
        assert_eq!(content_type_for("noextension"), "application/octet-stream");
    }
}
