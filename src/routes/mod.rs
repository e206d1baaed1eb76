use actix_web::web;

use crate::error::AppError;

pub mod destination;
pub mod health;
pub mod itinerary;
pub mod theme_park;

/// The full route table, shared by the server binary and the integration
/// tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::validation(format!("Invalid request body: {}", err)).into()
    }))
    .route("/health", web::get().to(|| async { "OK" }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/destinations", web::get().to(destination::get_destinations))
            .route("/interests", web::get().to(destination::get_interests))
            .route(
                "/cities-and-regions",
                web::get().to(destination::get_cities_and_regions),
            )
            .route(
                "/generate-itinerary",
                web::post().to(itinerary::generate_itinerary),
            )
            .route(
                "/generate-destination-data",
                web::post().to(itinerary::generate_destination_data),
            )
            .route("/export-itinerary", web::post().to(itinerary::export_itinerary))
            .route("/saved-itineraries", web::get().to(itinerary::get_saved))
            .route("/itineraries/{id}", web::get().to(itinerary::get_by_id))
            .service(theme_park_scope()),
    );
}

fn theme_park_scope() -> actix_web::Scope {
    web::scope("/theme-parks")
        .route("/parks", web::get().to(theme_park::get_all_parks))
        .route("/queue-times", web::get().to(theme_park::get_queue_times_parks))
        .route(
            "/waittimes-app",
            web::get().to(theme_park::get_waittimes_app_parks),
        )
        .route("/compare-parks", web::get().to(theme_park::compare_parks))
        .route("/parks/{id}", web::get().to(theme_park::get_park_details))
        .route(
            "/parks/{id}/attractions",
            web::get().to(theme_park::get_park_attractions),
        )
        .route(
            "/parks/{id}/wait-times",
            web::get().to(theme_park::get_wait_times),
        )
        .route(
            "/parks/{id}/crowds/{date}",
            web::get().to(theme_park::get_crowd_prediction),
        )
        .route(
            "/parks/{id}/optimize-plan",
            web::post().to(theme_park::optimize_plan),
        )
        .route("/{id}/wait-times", web::get().to(theme_park::get_wait_times))
        .route(
            "/{id}/crowds/{date}",
            web::get().to(theme_park::get_crowd_prediction),
        )
        .route("/{id}/optimize-plan", web::post().to(theme_park::optimize_plan))
}
