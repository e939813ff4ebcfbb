//! OpenAPI documentation, served at /api/openapi.json and browsable at /docs.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use gazette_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gazette API",
        version = "0.1.0",
        description = "Content management API for blogs, events, career postings, a gallery, \
                       and a contact form. Entity endpoints accept multipart uploads with an \
                       optional image or PDF attachment stored on a local or remote backend."
    ),
    paths(
        // Blogs
        handlers::blogs::list_blogs,
        handlers::blogs::get_blog,
        handlers::blogs::get_blog_by_slug,
        handlers::blogs::create_blog,
        handlers::blogs::update_blog,
        handlers::blogs::delete_blog,
        // Events
        handlers::events::list_events,
        handlers::events::get_event,
        handlers::events::create_event,
        handlers::events::update_event,
        handlers::events::delete_event,
        // Careers
        handlers::careers::list_careers,
        handlers::careers::get_career,
        handlers::careers::create_career,
        handlers::careers::update_career,
        handlers::careers::delete_career,
        // Gallery
        handlers::gallery::list_gallery_images,
        handlers::gallery::get_gallery_image,
        handlers::gallery::create_gallery_image,
        handlers::gallery::update_gallery_image,
        handlers::gallery::delete_gallery_image,
        // Contact
        handlers::contact::create_contact_message,
        handlers::contact::list_contact_messages,
        handlers::contact::get_contact_message,
        handlers::contact::delete_contact_message,
        // Files and probes
        handlers::uploads::serve_upload,
        handlers::health::health_check,
        handlers::health::liveness_check,
    ),
    components(
        schemas(
            // Entity models
            models::FileKind,
            models::CreateBlogRequest,
            models::UpdateBlogRequest,
            models::BlogResponse,
            models::CreateEventRequest,
            models::UpdateEventRequest,
            models::EventResponse,
            models::EmploymentType,
            models::CreateCareerRequest,
            models::UpdateCareerRequest,
            models::CareerResponse,
            models::CreateGalleryImageRequest,
            models::UpdateGalleryImageRequest,
            models::GalleryImageResponse,
            models::CreateContactMessageRequest,
            models::ContactMessageResponse,
            // Health
            handlers::health::HealthCheckResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "blogs", description = "Blog posts with optional cover image or PDF attachment"),
        (name = "events", description = "Events with optional flyer attachment"),
        (name = "careers", description = "Career postings with optional job description attachment"),
        (name = "gallery", description = "Image gallery"),
        (name = "contact", description = "Contact-form submissions"),
        (name = "uploads", description = "Locally stored upload serving"),
        (name = "health", description = "Health and liveness probes")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
