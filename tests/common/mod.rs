#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{body::MessageBody, middleware::Logger, web, App};
use std::sync::Arc;
use std::time::Duration;

use dream_travels_api::config::AppConfig;
use dream_travels_api::configure_routes;
use dream_travels_api::db::MemoryItineraryStore;
use dream_travels_api::services::activity_sources::CatalogSource;
use dream_travels_api::services::wait_times::WaitTimeProviders;
use dream_travels_api::state::AppState;

/// Nothing listens on the discard port, so providers pointed here fail fast
/// and fall back to cached or demonstration data.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

pub struct TestApp {
    pub state: web::Data<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_providers(UNREACHABLE, UNREACHABLE, None)
    }

    pub fn with_queue_times(base_url: &str) -> Self {
        Self::with_providers(base_url, UNREACHABLE, None)
    }

    pub fn with_waittimes_app(base_url: &str, api_key: &str) -> Self {
        Self::with_providers(UNREACHABLE, base_url, Some(api_key.to_string()))
    }

    pub fn with_providers(queue_times: &str, waittimes_app: &str, api_key: Option<String>) -> Self {
        let config = AppConfig {
            queue_times_base_url: queue_times.to_string(),
            waittimes_app_base_url: waittimes_app.to_string(),
            waittimes_app_api_key: api_key,
            provider_timeout: Duration::from_secs(2),
            blog_scraping_enabled: false,
            ..AppConfig::default()
        };
        let wait_times =
            WaitTimeProviders::from_config(&config).expect("providers build from test config");
        let state = AppState::build(
            config,
            Arc::new(MemoryItineraryStore::new()),
            vec![Arc::new(CatalogSource)],
            wait_times,
        );

        Self {
            state: web::Data::new(state),
        }
    }

    pub fn create_app(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(configure_routes)
    }
}

pub fn paris_request() -> serde_json::Value {
    serde_json::json!({
        "destination": "Paris",
        "interests": ["museums", "dining"],
        "number_of_days": 3,
        "solo_female_traveler": true,
        "custom_activities": [
            { "name": "Cooking class", "duration_minutes": 150, "best_time": "Afternoon" }
        ]
    })
}
