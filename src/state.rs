use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::db::{
    mongo::create_mongo_client, ItineraryStore, MemoryItineraryStore, MongoItineraryStore,
};
use crate::error::AppError;
use crate::services::activity_normalizer::ActivityNormalizer;
use crate::services::activity_sources::{ActivitySource, CatalogSource};
use crate::services::blog_scraper::BlogScraper;
use crate::services::itinerary_generation_service::{ItineraryGenerationConfig, ItineraryGenerator};
use crate::services::itinerary_service::ItineraryService;
use crate::services::touring_plan_service::{TouringPlanConfig, TouringPlanOptimizer};
use crate::services::wait_times::WaitTimeProviders;

/// Everything the handlers share, placed in `web::Data` once.
pub struct AppState {
    pub config: AppConfig,
    pub normalizer: Arc<ActivityNormalizer>,
    pub itineraries: ItineraryService,
    pub wait_times: WaitTimeProviders,
    pub touring: TouringPlanOptimizer,
}

impl AppState {
    pub async fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn ItineraryStore> = match &config.mongo_uri {
            Some(uri) => match create_mongo_client(uri, &config.mongo_database).await {
                Ok(client) => Arc::new(MongoItineraryStore::new(
                    client,
                    config.mongo_database.clone(),
                )),
                Err(e) => {
                    warn!("MongoDB unavailable ({}), itineraries will be kept in memory", e);
                    Arc::new(MemoryItineraryStore::new())
                }
            },
            None => {
                info!("MONGODB_URI not set, itineraries will be kept in memory");
                Arc::new(MemoryItineraryStore::new())
            }
        };

        let mut sources: Vec<Arc<dyn ActivitySource>> = vec![Arc::new(CatalogSource)];
        if config.blog_scraping_enabled {
            sources.push(Arc::new(BlogScraper::new(config.provider_timeout)?));
        }

        let wait_times = WaitTimeProviders::from_config(&config)?;

        Ok(Self::build(config, store, sources, wait_times))
    }

    /// Assemble state from already-built collaborators. Tests use this to
    /// swap in memory stores and stubbed providers.
    pub fn build(
        config: AppConfig,
        store: Arc<dyn ItineraryStore>,
        sources: Vec<Arc<dyn ActivitySource>>,
        wait_times: WaitTimeProviders,
    ) -> Self {
        let normalizer = Arc::new(ActivityNormalizer::new(sources));
        let generator = ItineraryGenerator::with_config(
            normalizer.clone(),
            ItineraryGenerationConfig {
                max_activities_per_day: config.max_activities_per_day,
                ..Default::default()
            },
        );
        let touring = TouringPlanOptimizer::with_config(TouringPlanConfig {
            overhead_minutes: config.attraction_overhead_minutes,
            ..Default::default()
        });

        Self {
            itineraries: ItineraryService::new(Arc::new(generator), store),
            normalizer,
            wait_times,
            touring,
            config,
        }
    }
}
