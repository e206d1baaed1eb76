pub mod activity_normalizer;
pub mod activity_sources;
pub mod blog_scraper;
pub mod crowd_predictor;
pub mod destination_catalog;
pub mod itinerary_generation_service;
pub mod itinerary_service;
pub mod touring_plan_service;
pub mod wait_times;
