use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::attachment::{Attachment, FileKind};

/// Employment type for a career posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "employment_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

/// Career posting with an optional job-description attachment
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Career {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub employment_type: EmploymentType,
    pub open: bool,
    pub file_url: Option<String>,
    pub file_type: FileKind,
    pub original_file_name: Option<String>,
    pub display_size: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Career {
    pub fn attachment(&self) -> Attachment {
        Attachment {
            file_url: self.file_url.clone(),
            file_type: self.file_type,
            original_file_name: self.original_file_name.clone(),
            display_size: self.display_size.clone(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCareerRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
    pub employment_type: EmploymentType,
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_open() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCareerRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    #[serde(default)]
    pub open: Option<bool>,
    /// Clear the current attachment without providing a replacement.
    #[serde(default)]
    pub remove_file: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CareerResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub employment_type: EmploymentType,
    pub open: bool,
    pub file_url: Option<String>,
    pub file_type: FileKind,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub original_file_name: Option<String>,
    pub display_size: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Career> for CareerResponse {
    fn from(career: Career) -> Self {
        let attachment = career.attachment();
        CareerResponse {
            image_url: attachment.image_url().map(str::to_string),
            pdf_url: attachment.pdf_url().map(str::to_string),
            id: career.id,
            title: career.title,
            description: career.description,
            location: career.location,
            employment_type: career.employment_type,
            open: career.open,
            file_url: career.file_url,
            file_type: career.file_type,
            original_file_name: career.original_file_name,
            display_size: career.display_size,
            created_at: career.created_at,
            updated_at: career.updated_at,
        }
    }
}
