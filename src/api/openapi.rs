//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    applications, events, health, media, media_categories, museum_halls, museum_sections,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kultura API",
        version = "1.0.0",
        description = "Cultural Center Content Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Kultura Team", email = "contact@kultura.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Events
        events::list_events,
        events::get_event,
        events::create_event,
        events::update_event,
        events::delete_event,
        events::upload_event_image,
        events::list_event_applications,
        events::create_event_application,
        // Applications
        applications::get_application,
        applications::update_application,
        applications::delete_application,
        // Media
        media::list_media,
        media::get_media,
        media::create_media,
        media::update_media,
        media::delete_media,
        media::upload_media_image,
        media::upload_media_file,
        media::create_media_photo,
        media::delete_media_photo,
        // Media categories
        media_categories::list_categories,
        media_categories::get_category,
        media_categories::create_category,
        media_categories::update_category,
        media_categories::delete_category,
        media_categories::add_media_to_category,
        media_categories::remove_media_from_category,
        // Museum halls
        museum_halls::list_halls,
        museum_halls::get_hall,
        museum_halls::create_hall,
        museum_halls::update_hall,
        museum_halls::delete_hall,
        museum_halls::upload_hall_image,
        museum_halls::list_hall_sections,
        museum_halls::create_hall_section,
        // Museum sections
        museum_sections::get_section,
        museum_sections::update_section,
        museum_sections::delete_section,
        museum_sections::upload_section_image,
    ),
    components(
        schemas(
            // Events
            crate::models::event::EventData,
            crate::models::event::EventOut,
            crate::models::application::ApplicationData,
            crate::models::application::ApplicationUpdate,
            crate::models::application::ApplicationOut,
            // Media
            crate::models::media::MediaData,
            crate::models::media::MediaOut,
            crate::models::media::MediaPhotoOut,
            crate::models::media::MediaCategoryData,
            crate::models::media::MediaCategoryOut,
            // Museum
            crate::models::museum::HallData,
            crate::models::museum::HallOut,
            crate::models::museum::SectionData,
            crate::models::museum::SectionOut,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "events", description = "Event management and applications"),
        (name = "applications", description = "Event application review"),
        (name = "media", description = "Media asset management"),
        (name = "media_categories", description = "Media category management"),
        (name = "museum_halls", description = "Museum hall management"),
        (name = "museum_sections", description = "Museum section management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
