//! WaitTimesApp provider for European parks.
//!
//! Requires a bearer API key. Without one the provider runs entirely on its
//! demo dataset; with one, upstream failures fall back to stale cache and
//! then to the same demo dataset.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use tracing::{debug, info, warn};

use super::cache::{TtlCache, CROWD_TTL, PARKS_TTL, WAIT_TIMES_TTL};
use super::client::ProviderClient;
use super::{demo, WaitTimeProvider};
use crate::error::AppError;
use crate::models::activity::Coordinates;
use crate::models::theme_park::{
    Attraction, AttractionStatus, CrowdPrediction, ParkWaitTimes, ThemePark, ThrillLevel,
    WaitSource,
};
use crate::services::crowd_predictor;

const PARKS_KEY: &str = "parks";
const DEFAULT_CALENDAR_CONFIDENCE: f32 = 0.8;

/// Ids come back as strings for some parks and integers for others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WtaId {
    Text(String),
    Number(u64),
}

impl fmt::Display for WtaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WtaId::Text(s) => f.write_str(s),
            WtaId::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WtaParksResponse {
    Wrapped { parks: Vec<WtaPark> },
    Bare(Vec<WtaPark>),
}

impl WtaParksResponse {
    fn into_parks(self) -> Vec<WtaPark> {
        match self {
            WtaParksResponse::Wrapped { parks } | WtaParksResponse::Bare(parks) => parks,
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct WtaPark {
    id: WtaId,
    name: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    latitude: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    longitude: Option<f64>,
}

impl WtaPark {
    fn into_park(self) -> ThemePark {
        let country = self.country.unwrap_or_default();
        let location = match self.city {
            Some(city) if !country.is_empty() => format!("{}, {}", city, country),
            Some(city) => city,
            None => country.clone(),
        };
        let coordinates = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };
        ThemePark {
            id: self.id.to_string(),
            name: self.name,
            location,
            country,
            continent: Some("Europe".to_string()),
            timezone: self.timezone,
            company: None,
            coordinates,
            crowd_level: None,
            crowd_description: None,
            attraction_count: None,
            source: WaitSource::WaitTimesApp.to_string(),
            is_demo: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WtaWaitResponse {
    #[serde(default)]
    attractions: Vec<WtaAttraction>,
}

#[derive(Debug, Deserialize)]
struct WtaAttraction {
    id: WtaId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    wait_time: Option<u32>,
    #[serde(default)]
    is_open: Option<bool>,
    #[serde(default)]
    area: Option<String>,
    #[serde(default)]
    thrill_level: Option<String>,
    #[serde(default)]
    height_requirement: Option<String>,
    #[serde(default)]
    fast_pass: bool,
    #[serde(default)]
    last_updated: Option<String>,
}

impl WtaAttraction {
    fn into_attraction(self) -> Attraction {
        let is_open = self.is_open.unwrap_or(true);
        Attraction {
            id: self.id.to_string(),
            name: self
                .name
                .unwrap_or_else(|| "Unknown Attraction".to_string()),
            land: self.area,
            thrill_level: self
                .thrill_level
                .as_deref()
                .map(ThrillLevel::from_label)
                .unwrap_or(ThrillLevel::Unknown),
            height_requirement: self.height_requirement,
            fastpass_available: self.fast_pass,
            status: if is_open {
                AttractionStatus::Operational
            } else {
                AttractionStatus::Closed
            },
            is_open,
            current_wait: self.wait_time.unwrap_or(0),
            historical_average: None,
            last_updated: self.last_updated,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WtaCrowdResponse {
    #[serde(default)]
    crowd_level: Option<u8>,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default)]
    peak_times: Vec<String>,
    #[serde(default)]
    best_times: Vec<String>,
    #[serde(default)]
    wait_multiplier: Option<f32>,
}

impl WtaCrowdResponse {
    fn into_prediction(self, park_id: &str, date: NaiveDate) -> CrowdPrediction {
        let index = self
            .crowd_level
            .unwrap_or(5)
            .min(crowd_predictor::MAX_CROWD_INDEX);
        CrowdPrediction {
            park_id: park_id.to_string(),
            date,
            crowd_index: index,
            crowd_description: crowd_predictor::describe(index).to_string(),
            prediction_confidence: self.confidence.unwrap_or(DEFAULT_CALENDAR_CONFIDENCE),
            peak_times: self.peak_times,
            best_visit_times: self.best_times,
            estimated_wait_multiplier: self
                .wait_multiplier
                .unwrap_or_else(|| crowd_predictor::wait_multiplier(index)),
            data_source: WaitSource::WaitTimesApp.to_string(),
            base_stats: None,
        }
    }
}

fn demo_waits_or_not_found(park_id: &str) -> Result<ParkWaitTimes, AppError> {
    demo::waittimes_app_waits(park_id)
        .ok_or_else(|| AppError::NotFound(format!("No wait times available for park {}", park_id)))
}

pub struct WaitTimesAppProvider {
    client: ProviderClient,
    api_key: Option<String>,
    parks: TtlCache<Vec<ThemePark>>,
    waits: TtlCache<ParkWaitTimes>,
    crowds: TtlCache<CrowdPrediction>,
}

impl WaitTimesAppProvider {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
        max_requests: usize,
        window: Duration,
    ) -> Result<Self, AppError> {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("No WaitTimesApp API key configured, serving demo data for European parks");
        }

        Ok(Self {
            client: ProviderClient::new(
                WaitSource::WaitTimesApp,
                base_url,
                timeout,
                max_requests,
                window,
            )?,
            api_key,
            parks: TtlCache::new(),
            waits: TtlCache::new(),
            crowds: TtlCache::new(),
        })
    }

    async fn fetch_parks(&self, key: &str) -> Result<Vec<ThemePark>, AppError> {
        let response: WtaParksResponse = self.client.get_json("/parks", &[], Some(key)).await?;
        let parks: Vec<ThemePark> = response
            .into_parks()
            .into_iter()
            .map(WtaPark::into_park)
            .collect();
        info!("Retrieved {} parks from waittimes-app", parks.len());
        Ok(parks)
    }

    async fn fetch_waits(&self, key: &str, park_id: &str) -> Result<ParkWaitTimes, AppError> {
        let path = format!("/parks/{}/wait-times", park_id);
        let response: WtaWaitResponse = self.client.get_json(&path, &[], Some(key)).await?;
        let attractions: Vec<Attraction> = response
            .attractions
            .into_iter()
            .map(WtaAttraction::into_attraction)
            .collect();
        let park_name = self
            .parks
            .get_stale(PARKS_KEY)
            .and_then(|parks| parks.into_iter().find(|p| p.id == park_id).map(|p| p.name));
        Ok(ParkWaitTimes::new(
            park_id,
            park_name,
            WaitSource::WaitTimesApp.to_string(),
            false,
            attractions,
        ))
    }

    async fn fetch_crowd(
        &self,
        key: &str,
        park_id: &str,
        date: NaiveDate,
    ) -> Result<CrowdPrediction, AppError> {
        let path = format!("/parks/{}/crowd-calendar", park_id);
        let query = [("date", date.format("%Y-%m-%d").to_string())];
        let response: WtaCrowdResponse = self.client.get_json(&path, &query, Some(key)).await?;
        Ok(response.into_prediction(park_id, date))
    }
}

#[async_trait]
impl WaitTimeProvider for WaitTimesAppProvider {
    fn source(&self) -> WaitSource {
        WaitSource::WaitTimesApp
    }

    fn is_live(&self) -> bool {
        self.api_key.is_some() && !self.client.limiter().is_backing_off()
    }

    async fn list_parks(&self) -> Vec<ThemePark> {
        let Some(key) = self.api_key.as_deref() else {
            return demo::waittimes_app_parks();
        };
        if let Some(parks) = self.parks.get_fresh(PARKS_KEY) {
            return parks;
        }

        match self.fetch_parks(key).await {
            Ok(parks) if !parks.is_empty() => {
                self.parks.insert(PARKS_KEY, parks.clone(), PARKS_TTL);
                parks
            }
            Ok(_) => {
                warn!("waittimes-app returned no parks, serving fallback list");
                self.parks
                    .get_stale(PARKS_KEY)
                    .unwrap_or_else(demo::waittimes_app_parks)
            }
            Err(e) => {
                warn!("waittimes-app park list unavailable ({}), serving fallback list", e);
                self.parks
                    .get_stale(PARKS_KEY)
                    .unwrap_or_else(demo::waittimes_app_parks)
            }
        }
    }

    async fn wait_times(&self, park_id: &str) -> Result<ParkWaitTimes, AppError> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("waittimes-app demo waits for {}", park_id);
            return demo_waits_or_not_found(park_id);
        };
        if let Some(waits) = self.waits.get_fresh(park_id) {
            return Ok(waits);
        }

        match self.fetch_waits(key, park_id).await {
            Ok(waits) => {
                self.waits.insert(park_id, waits.clone(), WAIT_TIMES_TTL);
                Ok(waits)
            }
            Err(e) => {
                warn!(
                    "waittimes-app waits for park {} unavailable ({}), serving fallback data",
                    park_id, e
                );
                let fallback = self
                    .waits
                    .get_stale(park_id)
                    .unwrap_or_else(|| demo::waittimes_app_fallback_waits(park_id));
                self.waits.insert(park_id, fallback.clone(), WAIT_TIMES_TTL);
                Ok(fallback)
            }
        }
    }

    async fn crowd_prediction(
        &self,
        park_id: &str,
        date: NaiveDate,
    ) -> Result<CrowdPrediction, AppError> {
        let Some(key) = self.api_key.as_deref() else {
            if demo::waittimes_app_waits(park_id).is_none() {
                return Err(AppError::NotFound(format!("Park {} not found", park_id)));
            }
            return Ok(demo::waittimes_app_crowd(park_id, date));
        };

        let cache_key = format!("{}:{}", park_id, date);
        if let Some(prediction) = self.crowds.get_fresh(&cache_key) {
            return Ok(prediction);
        }

        match self.fetch_crowd(key, park_id, date).await {
            Ok(prediction) => {
                self.crowds.insert(cache_key, prediction.clone(), CROWD_TTL);
                Ok(prediction)
            }
            Err(e) => {
                warn!(
                    "waittimes-app crowd calendar for {} unavailable ({}), serving fallback",
                    park_id, e
                );
                Ok(self
                    .crowds
                    .get_stale(&cache_key)
                    .unwrap_or_else(|| demo::waittimes_app_crowd(park_id, date)))
            }
        }
    }
}
