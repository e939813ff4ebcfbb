//! Gazette Storage Library
//!
//! Dual-backend attachment storage: local disk or a remote media service,
//! selected per file category by a pure routing policy. Entity handlers
//! only see the `AttachmentStorage` trait.
//!
//! Reference shapes:
//! - local: server-relative path under the uploads prefix, e.g.
//!   `/uploads/blogs/blog-1724880000000-532.jpg`
//! - remote: absolute delivery URL returned by the media service

pub mod factory;
pub mod filename;
pub mod local;
pub mod media_service;
pub mod selector;
pub mod store;
pub mod traits;

pub use factory::create_attachment_store;
pub use local::LocalUploads;
pub use media_service::{MediaServiceClient, RemoteUpload, ResourceKind};
pub use selector::{select_backend, BackendChoice};
pub use store::AttachmentStore;
pub use traits::{
    validate_upload, AttachmentStorage, EntityFolder, FileCategory, IncomingFile, StorageError,
    StorageResult, UploadPolicy,
};
