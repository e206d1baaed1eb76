//! queue-times.com provider.
//!
//! The public API is keyless: `/parks.json` returns companies with nested
//! parks and `/parks/{id}/queue_times.json` returns rides grouped by land.
//! It provides no crowd calendar, so crowd predictions always come from the
//! current waits.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use tracing::{info, warn};

use super::cache::{TtlCache, PARKS_TTL, WAIT_TIMES_TTL};
use super::client::ProviderClient;
use super::{demo, WaitTimeProvider};
use crate::error::AppError;
use crate::models::activity::Coordinates;
use crate::models::theme_park::{
    Attraction, AttractionStatus, ParkWaitTimes, ThemePark, ThrillLevel, WaitSource,
};

const PARKS_KEY: &str = "parks";

/// Friendly ids accepted in place of queue-times' numeric park ids.
const PARK_ALIASES: &[(&str, &str)] = &[
    ("disneyland_california", "1"),
    ("california_adventure", "2"),
    ("universal_studios_orlando", "3"),
    ("islands_of_adventure", "4"),
    ("wdw_magic_kingdom", "6"),
    ("wdw_hollywood_studios", "7"),
    ("wdw_epcot", "8"),
    ("wdw_animal_kingdom", "9"),
];

#[derive(Debug, Deserialize)]
struct QtCompany {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    parks: Vec<QtPark>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct QtPark {
    id: u64,
    name: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    continent: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    latitude: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct QtWaitResponse {
    #[serde(default)]
    lands: Vec<QtLand>,
    /// Rides that queue-times does not file under any land.
    #[serde(default)]
    rides: Vec<QtRide>,
}

#[derive(Debug, Deserialize)]
struct QtLand {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    rides: Vec<QtRide>,
}

#[derive(Debug, Deserialize)]
struct QtRide {
    id: u64,
    name: String,
    #[serde(default)]
    is_open: bool,
    #[serde(default)]
    wait_time: Option<u32>,
    #[serde(default)]
    last_updated: Option<String>,
}

impl QtRide {
    fn into_attraction(self, land: Option<&str>) -> Attraction {
        Attraction {
            id: self.id.to_string(),
            name: self.name,
            land: land.map(str::to_string),
            thrill_level: ThrillLevel::Unknown,
            height_requirement: None,
            fastpass_available: false,
            status: if self.is_open {
                AttractionStatus::Operational
            } else {
                AttractionStatus::Closed
            },
            is_open: self.is_open,
            current_wait: self.wait_time.unwrap_or(0),
            historical_average: None,
            last_updated: self.last_updated,
        }
    }
}

fn flatten_parks(companies: Vec<QtCompany>) -> Vec<ThemePark> {
    companies
        .into_iter()
        .flat_map(|company| {
            let company_name = company.name;
            company.parks.into_iter().map(move |park| {
                let coordinates = match (park.latitude, park.longitude) {
                    (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
                    _ => None,
                };
                let country = park.country.unwrap_or_default();
                ThemePark {
                    id: park.id.to_string(),
                    name: park.name,
                    location: country.clone(),
                    country,
                    continent: park.continent,
                    timezone: park.timezone,
                    company: company_name.clone(),
                    coordinates,
                    crowd_level: None,
                    crowd_description: None,
                    attraction_count: None,
                    source: WaitSource::QueueTimes.to_string(),
                    is_demo: false,
                }
            })
        })
        .collect()
}

fn flatten_rides(response: QtWaitResponse) -> Vec<Attraction> {
    let mut attractions = Vec::new();
    for land in response.lands {
        let land_name = land.name;
        attractions.extend(
            land.rides
                .into_iter()
                .map(|ride| ride.into_attraction(land_name.as_deref())),
        );
    }
    attractions.extend(response.rides.into_iter().map(|ride| ride.into_attraction(None)));
    attractions
}

/// Map an alias to its numeric queue-times id; other ids pass through.
pub fn resolve_alias(park_id: &str) -> &str {
    PARK_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(park_id))
        .map(|(_, id)| *id)
        .unwrap_or(park_id)
}

/// Whether `park_id` looks like a queue-times id (numeric or a known alias).
pub fn owns_park_id(park_id: &str) -> bool {
    let id = resolve_alias(park_id);
    !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
}

pub struct QueueTimesProvider {
    client: ProviderClient,
    parks: TtlCache<Vec<ThemePark>>,
    waits: TtlCache<ParkWaitTimes>,
}

impl QueueTimesProvider {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        max_requests: usize,
        window: Duration,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client: ProviderClient::new(
                WaitSource::QueueTimes,
                base_url,
                timeout,
                max_requests,
                window,
            )?,
            parks: TtlCache::new(),
            waits: TtlCache::new(),
        })
    }

    fn cached_park_name(&self, qt_id: &str) -> Option<String> {
        self.parks
            .get_stale(PARKS_KEY)
            .and_then(|parks| parks.into_iter().find(|p| p.id == qt_id).map(|p| p.name))
    }

    async fn fetch_parks(&self) -> Result<Vec<ThemePark>, AppError> {
        let companies: Vec<QtCompany> = self.client.get_json("/parks.json", &[], None).await?;
        let parks = flatten_parks(companies);
        info!("Retrieved {} parks from queue-times", parks.len());
        Ok(parks)
    }

    async fn fetch_waits(&self, qt_id: &str) -> Result<ParkWaitTimes, AppError> {
        let path = format!("/parks/{}/queue_times.json", qt_id);
        let response: QtWaitResponse = self.client.get_json(&path, &[], None).await?;
        let attractions = flatten_rides(response);
        info!(
            "Retrieved wait times for {} attractions in queue-times park {}",
            attractions.len(),
            qt_id
        );
        Ok(ParkWaitTimes::new(
            qt_id,
            self.cached_park_name(qt_id),
            WaitSource::QueueTimes.to_string(),
            false,
            attractions,
        ))
    }
}

#[async_trait]
impl WaitTimeProvider for QueueTimesProvider {
    fn source(&self) -> WaitSource {
        WaitSource::QueueTimes
    }

    fn is_live(&self) -> bool {
        !self.client.limiter().is_backing_off()
    }

    async fn list_parks(&self) -> Vec<ThemePark> {
        if let Some(parks) = self.parks.get_fresh(PARKS_KEY) {
            return parks;
        }

        match self.fetch_parks().await {
            Ok(parks) if !parks.is_empty() => {
                self.parks.insert(PARKS_KEY, parks.clone(), PARKS_TTL);
                parks
            }
            Ok(_) => {
                warn!("queue-times returned no parks, serving fallback list");
                self.parks
                    .get_stale(PARKS_KEY)
                    .unwrap_or_else(demo::queue_times_parks)
            }
            Err(e) => {
                warn!("queue-times park list unavailable ({}), serving fallback list", e);
                self.parks
                    .get_stale(PARKS_KEY)
                    .unwrap_or_else(demo::queue_times_parks)
            }
        }
    }

    async fn park(&self, park_id: &str) -> Option<ThemePark> {
        let qt_id = resolve_alias(park_id);
        self.list_parks().await.into_iter().find(|p| p.id == qt_id)
    }

    async fn wait_times(&self, park_id: &str) -> Result<ParkWaitTimes, AppError> {
        let qt_id = resolve_alias(park_id);

        let waits = match self.waits.get_fresh(qt_id) {
            Some(waits) => waits,
            None => match self.fetch_waits(qt_id).await {
                Ok(waits) => {
                    self.waits.insert(qt_id, waits.clone(), WAIT_TIMES_TTL);
                    waits
                }
                Err(e) => {
                    warn!(
                        "queue-times waits for park {} unavailable ({}), serving fallback data",
                        qt_id, e
                    );
                    let fallback = self
                        .waits
                        .get_stale(qt_id)
                        .unwrap_or_else(|| demo::queue_times_waits(qt_id));
                    self.waits.insert(qt_id, fallback.clone(), WAIT_TIMES_TTL);
                    fallback
                }
            },
        };

        Ok(ParkWaitTimes {
            park_id: park_id.to_string(),
            ..waits
        })
    }
}
