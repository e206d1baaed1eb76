//! Built-in demonstration datasets served when a provider is unreachable,
//! rate limited or unconfigured. Everything here is deterministic and
//! labelled `*-demo` with `is_demo: true`.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::activity::Coordinates;
use crate::models::theme_park::{
    Attraction, AttractionStatus, CrowdPrediction, ParkWaitTimes, ThemePark, ThrillLevel,
    WaitSource,
};
use crate::services::crowd_predictor;
use crate::models::theme_park::ThrillLevel::{Family, Moderate, Thrill};

/// Confidence attached to the calendar-style demo prediction.
pub const DEMO_CALENDAR_CONFIDENCE: f32 = 0.75;

struct DemoRide {
    id: &'static str,
    name: &'static str,
    land: &'static str,
    thrill: ThrillLevel,
    height: Option<&'static str>,
    fastpass: bool,
    wait: u32,
    open: bool,
}

struct DemoPark {
    id: &'static str,
    name: &'static str,
    location: &'static str,
    country: &'static str,
    continent: &'static str,
    timezone: &'static str,
    company: &'static str,
    lat: f64,
    lng: f64,
    rides: &'static [DemoRide],
}

const fn ride(
    id: &'static str,
    name: &'static str,
    land: &'static str,
    thrill: ThrillLevel,
    height: Option<&'static str>,
    fastpass: bool,
    wait: u32,
) -> DemoRide {
    DemoRide {
        id,
        name,
        land,
        thrill,
        height,
        fastpass,
        wait,
        open: true,
    }
}

const fn closed(
    id: &'static str,
    name: &'static str,
    land: &'static str,
    thrill: ThrillLevel,
) -> DemoRide {
    DemoRide {
        id,
        name,
        land,
        thrill,
        height: None,
        fastpass: false,
        wait: 0,
        open: false,
    }
}

static QUEUE_TIMES_PARKS: &[DemoPark] = &[
    DemoPark {
        id: "6",
        name: "Disney Magic Kingdom",
        location: "Lake Buena Vista, Florida",
        country: "United States",
        continent: "North America",
        timezone: "America/New_York",
        company: "Walt Disney Attractions",
        lat: 28.417663,
        lng: -81.581212,
        rides: &[
            ride("284", "Space Mountain", "Tomorrowland", Thrill, Some("44 in"), true, 45),
            ride("291", "Pirates of the Caribbean", "Adventureland", Family, None, true, 20),
            ride("290", "Haunted Mansion", "Liberty Square", Family, None, true, 35),
            ride(
                "298",
                "Big Thunder Mountain Railroad",
                "Frontierland",
                Thrill,
                Some("40 in"),
                true,
                30,
            ),
            ride(
                "1184",
                "Seven Dwarfs Mine Train",
                "Fantasyland",
                Moderate,
                Some("38 in"),
                true,
                70,
            ),
            ride("138", "\"it's a small world\"", "Fantasyland", Family, None, true, 10),
            closed("355", "Tomorrowland Speedway", "Tomorrowland", Family),
        ],
    },
    DemoPark {
        id: "7",
        name: "Disney Hollywood Studios",
        location: "Lake Buena Vista, Florida",
        country: "United States",
        continent: "North America",
        timezone: "America/New_York",
        company: "Walt Disney Attractions",
        lat: 28.357529,
        lng: -81.558271,
        rides: &[
            ride(
                "6361",
                "Star Wars: Rise of the Resistance",
                "Star Wars: Galaxy's Edge",
                Thrill,
                Some("40 in"),
                true,
                90,
            ),
            ride(
                "6368",
                "Millennium Falcon: Smugglers Run",
                "Star Wars: Galaxy's Edge",
                Moderate,
                Some("38 in"),
                true,
                45,
            ),
            ride(
                "119",
                "The Twilight Zone Tower of Terror",
                "Sunset Boulevard",
                Thrill,
                Some("40 in"),
                true,
                55,
            ),
            ride("123", "Toy Story Mania!", "Toy Story Land", Family, None, true, 35),
        ],
    },
    DemoPark {
        id: "8",
        name: "Epcot",
        location: "Lake Buena Vista, Florida",
        country: "United States",
        continent: "North America",
        timezone: "America/New_York",
        company: "Walt Disney Attractions",
        lat: 28.374694,
        lng: -81.549404,
        rides: &[
            ride("159", "Test Track", "World Discovery", Thrill, Some("40 in"), true, 50),
            ride(
                "151",
                "Soarin' Around the World",
                "World Nature",
                Moderate,
                Some("40 in"),
                true,
                40,
            ),
            ride(
                "10914",
                "Guardians of the Galaxy: Cosmic Rewind",
                "World Discovery",
                Thrill,
                Some("42 in"),
                false,
                75,
            ),
            ride("160", "Spaceship Earth", "World Celebration", Family, None, true, 15),
        ],
    },
    DemoPark {
        id: "9",
        name: "Disney Animal Kingdom",
        location: "Lake Buena Vista, Florida",
        country: "United States",
        continent: "North America",
        timezone: "America/New_York",
        company: "Walt Disney Attractions",
        lat: 28.35598,
        lng: -81.590769,
        rides: &[
            ride("4439", "Avatar Flight of Passage", "Pandora", Thrill, Some("44 in"), true, 80),
            ride("140", "Expedition Everest", "Asia", Thrill, Some("44 in"), true, 40),
            ride("139", "Kilimanjaro Safaris", "Africa", Family, None, true, 25),
        ],
    },
];

static WAITTIMES_APP_PARKS: &[DemoPark] = &[
    DemoPark {
        id: "europa_park",
        name: "Europa-Park",
        location: "Rust, Baden-Wurttemberg",
        country: "Germany",
        continent: "Europe",
        timezone: "Europe/Berlin",
        company: "Mack Rides",
        lat: 48.266,
        lng: 7.7216,
        rides: &[
            ride("blue_fire", "Blue Fire Megacoaster", "Iceland", Thrill, Some("130 cm"), true, 35),
            ride("silver_star", "Silver Star", "France", Thrill, Some("140 cm"), true, 45),
            ride("arthur", "Arthur", "Kingdom of the Minimoys", Family, Some("100 cm"), false, 25),
        ],
    },
    DemoPark {
        id: "phantasialand",
        name: "Phantasialand",
        location: "Bruhl, North Rhine-Westphalia",
        country: "Germany",
        continent: "Europe",
        timezone: "Europe/Berlin",
        company: "Phantasialand",
        lat: 50.7998,
        lng: 6.8788,
        rides: &[
            ride("taron", "Taron", "Klugheim", Thrill, Some("130 cm"), true, 55),
            ride("black_mamba", "Black Mamba", "Deep in Africa", Thrill, Some("140 cm"), true, 25),
        ],
    },
    DemoPark {
        id: "efteling",
        name: "Efteling",
        location: "Kaatsheuvel, North Brabant",
        country: "Netherlands",
        continent: "Europe",
        timezone: "Europe/Amsterdam",
        company: "Efteling",
        lat: 51.6498,
        lng: 5.0437,
        rides: &[
            ride("baron_1898", "Baron 1898", "Ruigrijk", Thrill, Some("132 cm"), true, 30),
            ride(
                "flying_dutchman",
                "De Vliegende Hollander",
                "Ruigrijk",
                Moderate,
                Some("120 cm"),
                true,
                20,
            ),
            ride("droomvlucht", "Droomvlucht", "Fantasierijk", Family, None, false, 15),
        ],
    },
];

/// Served for park ids that have no curated demo entry.
static GENERIC_RIDES: &[DemoRide] = &[
    ride("demo-coaster", "Demo Coaster", "Main Area", Thrill, Some("48 in"), false, 40),
    ride("demo-dark-ride", "Demo Dark Ride", "Main Area", Moderate, None, false, 25),
    ride("demo-carousel", "Demo Carousel", "Main Area", Family, None, false, 10),
];

fn to_attraction(ride: &DemoRide) -> Attraction {
    Attraction {
        id: ride.id.to_string(),
        name: ride.name.to_string(),
        land: Some(ride.land.to_string()),
        thrill_level: ride.thrill,
        height_requirement: ride.height.map(str::to_string),
        fastpass_available: ride.fastpass,
        status: if ride.open {
            AttractionStatus::Operational
        } else {
            AttractionStatus::Closed
        },
        is_open: ride.open,
        current_wait: ride.wait,
        historical_average: None,
        last_updated: None,
    }
}

fn to_park(park: &DemoPark, source: WaitSource) -> ThemePark {
    ThemePark {
        id: park.id.to_string(),
        name: park.name.to_string(),
        location: park.location.to_string(),
        country: park.country.to_string(),
        continent: Some(park.continent.to_string()),
        timezone: Some(park.timezone.to_string()),
        company: Some(park.company.to_string()),
        coordinates: Some(Coordinates {
            lat: park.lat,
            lng: park.lng,
        }),
        crowd_level: None,
        crowd_description: None,
        attraction_count: Some(park.rides.len()),
        source: source.demo_label(),
        is_demo: true,
    }
}

fn waits_for(
    park_id: &str,
    name: Option<&str>,
    rides: &[DemoRide],
    source: WaitSource,
) -> ParkWaitTimes {
    ParkWaitTimes::new(
        park_id,
        name.map(str::to_string),
        source.demo_label(),
        true,
        rides.iter().map(to_attraction).collect(),
    )
}

pub fn queue_times_parks() -> Vec<ThemePark> {
    QUEUE_TIMES_PARKS
        .iter()
        .map(|p| to_park(p, WaitSource::QueueTimes))
        .collect()
}

/// Demo waits for a queue-times park. Unknown ids get a generic ride set so
/// the caller always has something to plan against.
pub fn queue_times_waits(park_id: &str) -> ParkWaitTimes {
    match QUEUE_TIMES_PARKS.iter().find(|p| p.id == park_id) {
        Some(park) => waits_for(park_id, Some(park.name), park.rides, WaitSource::QueueTimes),
        None => waits_for(park_id, None, GENERIC_RIDES, WaitSource::QueueTimes),
    }
}

pub fn waittimes_app_parks() -> Vec<ThemePark> {
    WAITTIMES_APP_PARKS
        .iter()
        .map(|p| to_park(p, WaitSource::WaitTimesApp))
        .collect()
}

pub fn waittimes_app_waits(park_id: &str) -> Option<ParkWaitTimes> {
    WAITTIMES_APP_PARKS
        .iter()
        .find(|p| p.id == park_id)
        .map(|park| waits_for(park_id, Some(park.name), park.rides, WaitSource::WaitTimesApp))
}

/// Used when a keyed waittimes-app request fails: curated rides where we
/// have them, the generic set otherwise.
pub fn waittimes_app_fallback_waits(park_id: &str) -> ParkWaitTimes {
    waittimes_app_waits(park_id)
        .unwrap_or_else(|| waits_for(park_id, None, GENERIC_RIDES, WaitSource::WaitTimesApp))
}

fn seed_for(park_id: &str, date: NaiveDate) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in park_id.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash ^ date.num_days_from_ce() as u64
}

/// Calendar-style prediction: weekends run 6-8, weekdays 3-6, seeded by
/// park and date so the same question always gets the same answer.
pub fn waittimes_app_crowd(park_id: &str, date: NaiveDate) -> CrowdPrediction {
    let mut rng = StdRng::seed_from_u64(seed_for(park_id, date));
    let index: u8 = match date.weekday() {
        Weekday::Sat | Weekday::Sun => rng.gen_range(6..=8),
        _ => rng.gen_range(3..=6),
    };

    CrowdPrediction {
        park_id: park_id.to_string(),
        date,
        crowd_index: index,
        crowd_description: crowd_predictor::describe(index).to_string(),
        prediction_confidence: DEMO_CALENDAR_CONFIDENCE,
        peak_times: vec!["11:00 AM - 2:00 PM".to_string(), "4:00 PM - 6:00 PM".to_string()],
        best_visit_times: vec!["8:00 AM - 10:00 AM".to_string(), "7:00 PM - 9:00 PM".to_string()],
        estimated_wait_multiplier: 1.0 + (index as f32 - 5.0) * 0.2,
        data_source: WaitSource::WaitTimesApp.demo_label(),
        base_stats: None,
    }
}
