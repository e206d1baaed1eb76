use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::activity::Coordinates;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Destination {
    pub key: String,
    pub name: String,
    pub country: String,
    pub region: String,
    pub continent: String,
    pub description: String,
    /// Solo female safety rating, 1 (poor) to 5 (excellent).
    pub safety_rating: u8,
    pub safety_notes: String,
    pub hidden_gem: bool,
    pub image: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub popular_cities: Vec<String>,
}

impl Destination {
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DestinationFilter {
    pub region: Option<String>,
    pub city: Option<String>,
    pub continent: Option<String>,
    pub solo_female_safe: Option<bool>,
    pub hidden_gems: Option<bool>,
    pub min_safety_rating: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct DestinationListing {
    pub destinations: BTreeMap<String, Destination>,
    pub total: usize,
    pub regions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InterestListing {
    pub interests: Vec<String>,
    pub solo_female_guidelines: SoloFemaleGuidelines,
}

#[derive(Debug, Serialize, Clone)]
pub struct SoloFemaleGuidelines {
    pub general_tips: Vec<String>,
    pub accommodation_tips: Vec<String>,
    pub transportation_tips: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CitiesAndRegions {
    pub regions: BTreeMap<String, Vec<String>>,
    pub cities: Vec<CityEntry>,
}

#[derive(Debug, Serialize)]
pub struct CityEntry {
    pub city: String,
    pub destination: String,
    pub country: String,
    pub region: String,
    pub safety_rating: u8,
}
