//! Common utilities for multipart upload handlers
//!
//! Entity create/update endpoints take `multipart/form-data` with an
//! optional `file` part and a `payload` part carrying the JSON body.

use axum::extract::Multipart;
use bytes::Bytes;
use gazette_core::AppError;
use gazette_storage::IncomingFile;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Parsed multipart form: at most one file and an optional JSON payload.
#[derive(Debug, Default)]
pub struct MultipartUpload {
    pub file: Option<IncomingFile>,
    pub payload: Option<String>,
}

/// Extract the `file` and `payload` fields from a multipart form.
/// Multiple file fields are rejected; unknown fields are ignored.
pub async fn extract_upload(mut multipart: Multipart) -> Result<MultipartUpload, AppError> {
    let mut upload = MultipartUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if upload.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let original_file_name = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let content_type = field
                    .content_type()
                    .map(|s: &str| normalize_mime_type(s).to_lowercase())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data: Bytes = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                upload.file = Some(IncomingFile {
                    data,
                    content_type,
                    original_file_name,
                });
            }
            "payload" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read payload field: {}", e))
                })?;
                upload.payload = Some(text);
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Parse and validate the JSON payload of a multipart form. Fails when the
/// payload field is missing.
pub fn parse_required_payload<T>(payload: Option<String>) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let raw = payload
        .ok_or_else(|| AppError::InvalidInput("Missing 'payload' form field".to_string()))?;
    parse_payload(&raw)
}

/// Parse and validate the JSON payload, falling back to `T::default()` when
/// the payload field is absent (update endpoints where only the file changes).
pub fn parse_optional_payload<T>(payload: Option<String>) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate + Default,
{
    match payload {
        Some(raw) => parse_payload(&raw),
        None => Ok(T::default()),
    }
}

fn parse_payload<T>(raw: &str) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_str(raw)
        .map_err(|e| AppError::InvalidInput(format!("Invalid payload JSON: {}", e)))?;
    parsed.validate()?;
    Ok(parsed)
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Derive a URL slug from a title: lowercase, alphanumerics kept, runs of
/// anything else collapsed to single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let trimmed = slug.trim_end_matches('-').to_string();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_parameters() {
        assert_eq!(normalize_mime_type("image/jpeg; charset=utf-8"), "image/jpeg");
        assert_eq!(normalize_mime_type("application/pdf"), "application/pdf");
    }

    #[test]
    fn slugify_collapses_and_lowercases() {
        assert_eq!(slugify("Launch Notes, Part 2!"), "launch-notes-part-2");
        assert_eq!(slugify("  --  "), "untitled");
        assert_eq!(slugify("Déjà vu"), "d-j-vu");
    }

    #[test]
    fn optional_payload_defaults_when_absent() {
        use gazette_core::models::UpdateBlogRequest;
        let parsed: UpdateBlogRequest = parse_optional_payload(None).unwrap();
        assert!(parsed.title.is_none());
        assert!(!parsed.remove_file);
    }

    #[test]
    fn payload_validation_failures_surface_as_invalid_input() {
        use gazette_core::models::CreateBlogRequest;
        let raw = r#"{"title":"","content":"x","author":"y"}"#.to_string();
        let result: Result<CreateBlogRequest, _> = parse_required_payload(Some(raw));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
