use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::models::destination::{DestinationFilter, InterestListing};
use crate::services::destination_catalog;

/// Raw query string. Browsers send empty values (`?hidden_gems=`) for unset
/// filters, so everything arrives as text and is interpreted here.
#[derive(Debug, Deserialize, Default)]
pub struct DestinationQuery {
    region: Option<String>,
    city: Option<String>,
    continent: Option<String>,
    solo_female_safe: Option<String>,
    hidden_gems: Option<String>,
    min_safety_rating: Option<String>,
}

fn flag(value: &Option<String>) -> Option<bool> {
    match value.as_deref().map(|v| v.trim().to_lowercase()) {
        Some(v) if matches!(v.as_str(), "true" | "1" | "yes" | "on") => Some(true),
        Some(v) if matches!(v.as_str(), "false" | "0" | "no" | "off") => Some(false),
        _ => None,
    }
}

impl From<DestinationQuery> for DestinationFilter {
    fn from(query: DestinationQuery) -> Self {
        DestinationFilter {
            solo_female_safe: flag(&query.solo_female_safe),
            hidden_gems: flag(&query.hidden_gems),
            min_safety_rating: query
                .min_safety_rating
                .as_deref()
                .and_then(|v| v.trim().parse().ok()),
            region: query.region,
            city: query.city,
            continent: query.continent,
        }
    }
}

/*
    /api/destinations
*/
pub async fn get_destinations(query: web::Query<DestinationQuery>) -> impl Responder {
    let filter = DestinationFilter::from(query.into_inner());
    HttpResponse::Ok().json(destination_catalog::filter_destinations(&filter))
}

/*
    /api/interests
*/
pub async fn get_interests() -> impl Responder {
    HttpResponse::Ok().json(InterestListing {
        interests: destination_catalog::interests(),
        solo_female_guidelines: destination_catalog::solo_female_guidelines(),
    })
}

/*
    /api/cities-and-regions
*/
pub async fn get_cities_and_regions() -> impl Responder {
    HttpResponse::Ok().json(destination_catalog::cities_and_regions())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_flags_are_ignored() {
        let filter = DestinationFilter::from(DestinationQuery {
            solo_female_safe: Some(String::new()),
            hidden_gems: Some("TRUE".to_string()),
            min_safety_rating: Some("four".to_string()),
            ..Default::default()
        });
        assert_eq!(filter.solo_female_safe, None);
        assert_eq!(filter.hidden_gems, Some(true));
        assert_eq!(filter.min_safety_rating, None);
    }
}
