//! Remote media service adapter
//!
//! Wraps the service's upload/destroy HTTP API. Deletion has to re-derive
//! the service-side identifier from the stored URL, which is best-effort
//! string matching; URLs that do not match the expected shape are treated
//! as already deleted. Keep that heuristic isolated here so it can be
//! replaced with a stored identifier column later.

use bytes::Bytes;
use serde::Deserialize;

use crate::filename::sanitize_remote_name;
use crate::traits::{StorageError, StorageResult};

const UPLOAD_MARKER: &str = "/upload/";

/// Remote resource kind, encoded in the URL path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Raw,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Raw => "raw",
        }
    }
}

/// Result of a successful remote upload
#[derive(Debug, Clone)]
pub struct RemoteUpload {
    pub secure_url: String,
    pub public_id: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponseBody {
    secure_url: String,
    public_id: String,
}

/// Extract the service-side public id from a delivery URL.
///
/// The id is everything after the `/upload/` marker, minus an optional
/// `v<digits>` version segment, the trailing extension, and any query
/// string. Returns None when the URL does not contain the marker.
pub fn public_id_from_url(url: &str) -> Option<String> {
    let idx = url.find(UPLOAD_MARKER)?;
    let rest = &url[idx + UPLOAD_MARKER.len()..];
    let rest = rest.split('?').next().unwrap_or(rest);

    let mut segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    if let Some(first) = segments.first() {
        let is_version =
            first.len() > 1 && first.starts_with('v') && first[1..].bytes().all(|b| b.is_ascii_digit());
        if is_version {
            segments.remove(0);
        }
    }

    if segments.is_empty() {
        return None;
    }

    let joined = segments.join("/");
    match joined.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && !stem.ends_with('/') && !ext.contains('/') =>
        {
            Some(stem.to_string())
        }
        _ => Some(joined),
    }
}

/// Infer the resource kind from the path segment before `/upload/`.
pub fn resource_kind_from_url(url: &str) -> ResourceKind {
    let Some(idx) = url.find(UPLOAD_MARKER) else {
        return ResourceKind::Image;
    };
    match url[..idx].rsplit('/').next() {
        Some("raw") => ResourceKind::Raw,
        _ => ResourceKind::Image,
    }
}

/// Client for the remote media service
#[derive(Clone)]
pub struct MediaServiceClient {
    http: reqwest::Client,
    base_url: String,
    cloud: String,
    api_key: String,
}

impl MediaServiceClient {
    pub fn new(base_url: &str, cloud: &str, api_key: &str) -> Self {
        MediaServiceClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cloud: cloud.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Upload a file into a remote folder. `desired_name` is sanitized to a
    /// safe identifier charset before use.
    pub async fn upload(
        &self,
        data: Bytes,
        content_type: &str,
        folder: &str,
        desired_name: &str,
    ) -> StorageResult<RemoteUpload> {
        let public_id = sanitize_remote_name(desired_name);
        let endpoint = format!("{}/v1/{}/auto/upload", self.base_url, self.cloud);

        let part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name(public_id.clone())
            .mime_str(content_type)
            .map_err(|e| StorageError::UploadFailed(format!("Invalid content type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", folder.to_string())
            .text("public_id", public_id);

        let start = std::time::Instant::now();

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::UploadFailed(format!(
                "Media service returned {}: {}",
                status, body
            )));
        }

        let body: UploadResponseBody = response.json().await.map_err(|e| {
            StorageError::UploadFailed(format!("Invalid upload response: {}", e))
        })?;

        tracing::info!(
            folder = %folder,
            public_id = %body.public_id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remote upload successful"
        );

        Ok(RemoteUpload {
            secure_url: body.secure_url,
            public_id: body.public_id,
        })
    }

    /// Delete a remote object by its delivery URL. URLs the id cannot be
    /// derived from are logged and treated as already deleted.
    pub async fn destroy(&self, url: &str) -> StorageResult<()> {
        let Some(public_id) = public_id_from_url(url) else {
            tracing::warn!(url = %url, "Cannot derive public id from URL, treating as deleted");
            return Ok(());
        };
        let kind = resource_kind_from_url(url);

        let endpoint = format!("{}/v1/{}/{}/destroy", self.base_url, self.cloud, kind.as_str());

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "public_id": public_id }))
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(format!("Destroy request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::DeleteFailed(format!(
                "Media service returned {}: {}",
                status, body
            )));
        }

        tracing::info!(public_id = %public_id, kind = kind.as_str(), "Remote object destroyed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_id_skips_version_and_strips_extension() {
        let url = "https://media.example.com/acme/image/upload/v1724880000/blogs/blog-17-42.jpg";
        assert_eq!(public_id_from_url(url).as_deref(), Some("blogs/blog-17-42"));
    }

    #[test]
    fn public_id_without_version_segment() {
        let url = "https://media.example.com/acme/raw/upload/careers/career-3-9.pdf";
        assert_eq!(
            public_id_from_url(url).as_deref(),
            Some("careers/career-3-9")
        );
    }

    #[test]
    fn public_id_strips_query_string() {
        let url =
            "https://media.example.com/acme/image/upload/v1/gallery/shot.png?w=640&fmt=auto";
        assert_eq!(public_id_from_url(url).as_deref(), Some("gallery/shot"));
    }

    #[test]
    fn public_id_keeps_dots_in_folder_segments() {
        let url = "https://media.example.com/acme/image/upload/v1/folder.v2/name";
        assert_eq!(public_id_from_url(url).as_deref(), Some("folder.v2/name"));
    }

    #[test]
    fn malformed_urls_yield_no_public_id() {
        assert_eq!(public_id_from_url("https://example.com/no/marker.jpg"), None);
        assert_eq!(public_id_from_url("not a url"), None);
        assert_eq!(
            public_id_from_url("https://media.example.com/acme/image/upload/"),
            None
        );
    }

    #[test]
    fn resource_kind_comes_from_segment_before_marker() {
        assert_eq!(
            resource_kind_from_url("https://m.example.com/acme/image/upload/v1/a.jpg"),
            ResourceKind::Image
        );
        assert_eq!(
            resource_kind_from_url("https://m.example.com/acme/raw/upload/v1/a.pdf"),
            ResourceKind::Raw
        );
        // Unknown segments default to image, the common case.
        assert_eq!(
            resource_kind_from_url("https://m.example.com/acme/video/upload/v1/a.mp4"),
            ResourceKind::Image
        );
    }

    #[test]
    fn version_like_names_are_not_dropped_when_not_versions() {
        let url = "https://media.example.com/acme/image/upload/vintage/photo.jpg";
        assert_eq!(public_id_from_url(url).as_deref(), Some("vintage/photo"));
    }
}
