use std::{env, time::Duration};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "DreamTravels";
const QUEUE_TIMES_BASE_URL: &str = "https://queue-times.com";
const WAITTIMES_APP_BASE_URL: &str = "https://api.wartezeiten.app";
const PROVIDER_TIMEOUT_SECS: u64 = 8;
// queue-times.com starts answering 429 at roughly ten calls a minute
const PROVIDER_RATE_LIMIT: usize = 10;
const PROVIDER_RATE_WINDOW_SECS: u64 = 60;
const MAX_ACTIVITIES_PER_DAY: usize = 4;
const ATTRACTION_OVERHEAD_MINUTES: u32 = 15;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: Option<String>,
    pub mongo_database: String,
    pub queue_times_base_url: String,
    pub waittimes_app_base_url: String,
    pub waittimes_app_api_key: Option<String>,
    pub provider_timeout: Duration,
    pub provider_rate_limit: usize,
    pub provider_rate_window: Duration,
    pub blog_scraping_enabled: bool,
    pub max_activities_per_day: usize,
    pub attraction_overhead_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            mongo_uri: None,
            mongo_database: DATABASE.to_string(),
            queue_times_base_url: QUEUE_TIMES_BASE_URL.to_string(),
            waittimes_app_base_url: WAITTIMES_APP_BASE_URL.to_string(),
            waittimes_app_api_key: None,
            provider_timeout: Duration::from_secs(PROVIDER_TIMEOUT_SECS),
            provider_rate_limit: PROVIDER_RATE_LIMIT,
            provider_rate_window: Duration::from_secs(PROVIDER_RATE_WINDOW_SECS),
            blog_scraping_enabled: true,
            max_activities_per_day: MAX_ACTIVITIES_PER_DAY,
            attraction_overhead_minutes: ATTRACTION_OVERHEAD_MINUTES,
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, keeping defaults for anything
    /// missing or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT").unwrap_or(defaults.port),
            mongo_uri: non_empty("MONGODB_URI"),
            mongo_database: non_empty("MONGODB_DATABASE").unwrap_or(defaults.mongo_database),
            queue_times_base_url: non_empty("QUEUE_TIMES_BASE_URL")
                .unwrap_or(defaults.queue_times_base_url),
            waittimes_app_base_url: non_empty("WAITTIMES_APP_BASE_URL")
                .unwrap_or(defaults.waittimes_app_base_url),
            waittimes_app_api_key: non_empty("WAITTIMES_APP_API_KEY"),
            provider_timeout: parsed("PROVIDER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.provider_timeout),
            provider_rate_limit: parsed("PROVIDER_RATE_LIMIT")
                .unwrap_or(defaults.provider_rate_limit),
            provider_rate_window: parsed("PROVIDER_RATE_WINDOW_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.provider_rate_window),
            blog_scraping_enabled: parsed("BLOG_SCRAPING_ENABLED")
                .unwrap_or(defaults.blog_scraping_enabled),
            max_activities_per_day: parsed::<usize>("MAX_ACTIVITIES_PER_DAY")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_activities_per_day),
            attraction_overhead_minutes: parsed("ATTRACTION_OVERHEAD_MINUTES")
                .unwrap_or(defaults.attraction_overhead_minutes),
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
