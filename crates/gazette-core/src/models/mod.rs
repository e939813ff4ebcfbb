pub mod attachment;
pub mod blog;
pub mod career;
pub mod contact;
pub mod event;
pub mod gallery_image;

pub use attachment::{format_display_size, Attachment, FileKind};
pub use blog::{Blog, BlogResponse, CreateBlogRequest, UpdateBlogRequest};
pub use career::{
    Career, CareerResponse, CreateCareerRequest, EmploymentType, UpdateCareerRequest,
};
pub use contact::{ContactMessage, ContactMessageResponse, CreateContactMessageRequest};
pub use event::{CreateEventRequest, Event, EventResponse, UpdateEventRequest};
pub use gallery_image::{
    CreateGalleryImageRequest, GalleryImage, GalleryImageResponse, UpdateGalleryImageRequest,
};
