//! Gazette Database Library
//!
//! Repositories for the content entities. Each repository wraps a PgPool
//! and maps constraint violations to validation errors at this boundary.

pub mod db;

pub use db::blog::BlogRepository;
pub use db::career::CareerRepository;
pub use db::contact::ContactRepository;
pub use db::event::EventRepository;
pub use db::gallery_image::GalleryImageRepository;
pub use db::Page;
