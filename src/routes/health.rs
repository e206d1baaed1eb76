use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use tracing::warn;

use crate::models::theme_park::WaitSource;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: BTreeMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details.into()),
        }
    }

    fn degraded(details: impl Into<String>) -> Self {
        Self {
            status: "degraded".to_string(),
            details: Some(details.into()),
        }
    }

    fn error(details: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details.into()),
        }
    }
}

/*
    /api/health
*/
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: BTreeMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    health
        .services
        .insert("itinerary_store".to_string(), check_store(&data).await);
    for source in [WaitSource::QueueTimes, WaitSource::WaitTimesApp] {
        health
            .services
            .insert(source.to_string(), check_provider(&data, source));
    }
    health
        .services
        .insert("blog_scraping".to_string(), check_blog_scraping(&data));

    if health.services.values().any(|s| s.status != "ok") {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_store(data: &AppState) -> ServiceStatus {
    let store = data.itineraries.store();
    match store.ping().await {
        Ok(()) => ServiceStatus::ok(format!("{} store reachable", store.backend())),
        Err(e) => {
            warn!("Itinerary store health check failed: {}", e);
            ServiceStatus::error(format!("{} store unreachable: {}", store.backend(), e))
        }
    }
}

fn check_provider(data: &AppState, source: WaitSource) -> ServiceStatus {
    if data.wait_times.get(source).is_live() {
        ServiceStatus::ok("Live data")
    } else {
        ServiceStatus::degraded("Serving cached or demonstration data")
    }
}

fn check_blog_scraping(data: &AppState) -> ServiceStatus {
    if data.config.blog_scraping_enabled {
        ServiceStatus::ok(format!(
            "Activity sources: {}",
            data.normalizer.source_names().join(", ")
        ))
    } else {
        ServiceStatus::degraded("Blog scraping disabled, using the curated catalog only")
    }
}
