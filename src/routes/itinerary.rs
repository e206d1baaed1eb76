use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::AppError;
use crate::models::itinerary::{DestinationDataRequest, ExportRequest, ItineraryRequest};
use crate::state::AppState;

/*
    /api/generate-itinerary
*/
pub async fn generate_itinerary(
    data: web::Data<AppState>,
    input: web::Json<ItineraryRequest>,
) -> Result<HttpResponse, AppError> {
    let itinerary = data.itineraries.generate(&input).await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

/*
    /api/generate-destination-data
*/
pub async fn generate_destination_data(
    data: web::Data<AppState>,
    input: web::Json<DestinationDataRequest>,
) -> Result<HttpResponse, AppError> {
    let destination = input.destination.trim();
    if destination.is_empty() {
        return Err(AppError::validation("Destination is required"));
    }

    info!(
        "Gathering destination data for {} from {:?}",
        destination,
        data.normalizer.source_names()
    );
    let bundle = data.normalizer.gather(destination, &input.interests).await;
    Ok(HttpResponse::Ok().json(bundle))
}

/*
    /api/export-itinerary
*/
pub async fn export_itinerary(
    data: web::Data<AppState>,
    input: web::Json<ExportRequest>,
) -> Result<HttpResponse, AppError> {
    let confirmation = data.itineraries.export(&input).await?;
    Ok(HttpResponse::Ok().json(confirmation))
}

/*
    /api/itineraries/{id}
*/
pub async fn get_by_id(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let itinerary = data.itineraries.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

/*
    /api/saved-itineraries
*/
pub async fn get_saved(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let summaries = data.itineraries.saved().await?;
    Ok(HttpResponse::Ok().json(summaries))
}
