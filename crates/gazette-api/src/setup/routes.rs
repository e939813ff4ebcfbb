//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Json, Router,
};
use gazette_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

// Headroom on top of the largest accepted file for multipart framing and
// the JSON payload part.
const UPLOAD_BODY_OVERHEAD: usize = 64 * 1024;

// Server-level cap on in-flight requests.
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let api_routes = Router::new()
        // Blogs
        .route(
            "/api/blogs",
            get(handlers::blogs::list_blogs).post(handlers::blogs::create_blog),
        )
        .route(
            "/api/blogs/{id}",
            get(handlers::blogs::get_blog)
                .put(handlers::blogs::update_blog)
                .delete(handlers::blogs::delete_blog),
        )
        .route("/api/blogs/slug/{slug}", get(handlers::blogs::get_blog_by_slug))
        // Events
        .route(
            "/api/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/api/events/{id}",
            get(handlers::events::get_event)
                .put(handlers::events::update_event)
                .delete(handlers::events::delete_event),
        )
        // Careers
        .route(
            "/api/careers",
            get(handlers::careers::list_careers).post(handlers::careers::create_career),
        )
        .route(
            "/api/careers/{id}",
            get(handlers::careers::get_career)
                .put(handlers::careers::update_career)
                .delete(handlers::careers::delete_career),
        )
        // Gallery
        .route(
            "/api/gallery",
            get(handlers::gallery::list_gallery_images).post(handlers::gallery::create_gallery_image),
        )
        .route(
            "/api/gallery/{id}",
            get(handlers::gallery::get_gallery_image)
                .put(handlers::gallery::update_gallery_image)
                .delete(handlers::gallery::delete_gallery_image),
        )
        // Contact
        .route(
            "/api/contact",
            get(handlers::contact::list_contact_messages)
                .post(handlers::contact::create_contact_message),
        )
        .route(
            "/api/contact/{id}",
            get(handlers::contact::get_contact_message)
                .delete(handlers::contact::delete_contact_message),
        )
        // Locally stored uploads
        .route(
            "/uploads/{folder}/{filename}",
            get(handlers::uploads::serve_upload),
        )
        // Probes and docs
        .route("/health", get(handlers::health::health_check))
        .route("/live", get(handlers::health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .with_state(state);

    let app = api_routes
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            config.max_document_size_bytes() + UPLOAD_BODY_OVERHEAD,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins().iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    };
    Ok(cors)
}
