//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef`.

use std::sync::Arc;

use gazette_core::Config;
use gazette_db::{
    BlogRepository, CareerRepository, ContactRepository, EventRepository, GalleryImageRepository,
};
use gazette_storage::{AttachmentStorage, LocalUploads, UploadPolicy};
use sqlx::PgPool;

use crate::services::email::EmailService;

/// Database pool and entity repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub blogs: BlogRepository,
    pub events: EventRepository,
    pub careers: CareerRepository,
    pub gallery_images: GalleryImageRepository,
    pub contacts: ContactRepository,
}

impl DbState {
    pub fn new(pool: PgPool) -> Self {
        DbState {
            blogs: BlogRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            careers: CareerRepository::new(pool.clone()),
            gallery_images: GalleryImageRepository::new(pool.clone()),
            contacts: ContactRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Attachment storage and upload limits.
#[derive(Clone)]
pub struct UploadState {
    pub storage: Arc<dyn AttachmentStorage>,
    /// Kept separately from the store for serving local files back over HTTP.
    pub local: LocalUploads,
    pub max_image_size_bytes: usize,
    pub max_document_size_bytes: usize,
}

impl UploadState {
    /// Policy for endpoints that accept an image or a PDF attachment.
    pub fn attachment_policy(&self) -> UploadPolicy {
        UploadPolicy::images_and_pdfs(self.max_document_size_bytes)
    }

    /// Policy for image-only endpoints (gallery).
    pub fn image_policy(&self) -> UploadPolicy {
        UploadPolicy::images_only(self.max_image_size_bytes)
    }
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub uploads: UploadState,
    pub email: Option<EmailService>,
    pub config: Config,
    pub is_production: bool,
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for UploadState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.uploads.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
