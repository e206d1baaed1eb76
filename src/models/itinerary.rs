use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::activity::{Activity, CustomActivityInput, Restaurant};
use super::numbers::deserialize_optional_rounded_u32;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    Moderate,
    Luxury,
}

impl std::str::FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" | "low" => Ok(BudgetTier::Budget),
            "moderate" | "mid" | "medium" => Ok(BudgetTier::Moderate),
            "luxury" | "high" => Ok(BudgetTier::Luxury),
            other => Err(format!(
                "Unknown budget range '{}', expected budget, moderate or luxury",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ItineraryRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub travel_dates: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_optional_rounded_u32")]
    pub number_of_days: Option<u32>,
    #[serde(default)]
    pub solo_female_traveler: bool,
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub custom_activities: Vec<CustomActivityInput>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Day {
    pub day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub title: String,
    pub activities: Vec<Activity>,
    pub total_estimated_minutes: u32,
    pub total_estimated_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_notes: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Itinerary {
    pub id: String,
    pub destination: String,
    pub destinations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    pub interests: Vec<String>,
    pub number_of_days: u32,
    pub days: Vec<Day>,
    pub solo_female_traveler: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_notes: Option<String>,
    pub total_activities: usize,
    pub custom_activities_count: usize,
    /// Catalog or scraped activities that did not fit in any day.
    pub unscheduled_activities: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItinerarySummary {
    pub id: String,
    pub destination: String,
    pub number_of_days: u32,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Itinerary> for ItinerarySummary {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            id: itinerary.id.clone(),
            destination: itinerary.destination.clone(),
            number_of_days: itinerary.number_of_days,
            interests: itinerary.interests.clone(),
            created_at: itinerary.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportRequest {
    #[serde(default)]
    pub itinerary_id: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ExportConfirmation {
    pub status: String,
    pub message: String,
    pub export_id: String,
    pub itinerary_id: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DestinationDataRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct DestinationData {
    pub destination: String,
    pub interests: Vec<String>,
    pub activities: Vec<Activity>,
    pub restaurants: Vec<Restaurant>,
    pub local_tips: Vec<String>,
    pub sources: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_budget_tiers() {
        assert_eq!("Luxury".parse::<BudgetTier>(), Ok(BudgetTier::Luxury));
        assert_eq!(" mid ".parse::<BudgetTier>(), Ok(BudgetTier::Moderate));
        assert!("platinum".parse::<BudgetTier>().is_err());
    }

    #[test]
    fn request_accepts_minimal_body() {
        let req: ItineraryRequest = serde_json::from_str(
            r#"{"destination": "Paris", "interests": ["museums"], "number_of_days": 3}"#,
        )
        .unwrap();
        assert_eq!(req.number_of_days, Some(3));
        assert!(req.travel_dates.is_none());
        assert!(!req.solo_female_traveler);
        assert!(req.custom_activities.is_empty());
    }
}
