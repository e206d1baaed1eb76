use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::activity::Coordinates;

/// Upstream wait-time providers.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WaitSource {
    QueueTimes,
    #[serde(rename = "waittimes-app")]
    WaitTimesApp,
}

impl WaitSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitSource::QueueTimes => "queue-times",
            WaitSource::WaitTimesApp => "waittimes-app",
        }
    }

    pub fn demo_label(&self) -> String {
        format!("{}-demo", self.as_str())
    }
}

impl fmt::Display for WaitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaitSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "queue-times" | "queuetimes" => Ok(WaitSource::QueueTimes),
            "waittimes-app" | "waittimesapp" | "wartezeiten" => Ok(WaitSource::WaitTimesApp),
            other => Err(format!(
                "Unknown source '{}', expected queue-times or waittimes-app",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThrillLevel {
    Family,
    Moderate,
    Thrill,
    Unknown,
}

impl ThrillLevel {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return ThrillLevel::Unknown;
        }
        if ["thrill", "extreme", "high", "coaster", "intense"]
            .iter()
            .any(|k| label.contains(k))
        {
            ThrillLevel::Thrill
        } else if ["family", "kid", "low", "gentle", "show"]
            .iter()
            .any(|k| label.contains(k))
        {
            ThrillLevel::Family
        } else if ["moderate", "medium", "mild"].iter().any(|k| label.contains(k)) {
            ThrillLevel::Moderate
        } else {
            ThrillLevel::Unknown
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttractionStatus {
    Operational,
    Closed,
    Down,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ThemePark {
    pub id: String,
    pub name: String,
    pub location: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attraction_count: Option<usize>,
    pub source: String,
    #[serde(default)]
    pub is_demo: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Attraction {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land: Option<String>,
    pub thrill_level: ThrillLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_requirement: Option<String>,
    pub fastpass_available: bool,
    pub status: AttractionStatus,
    pub is_open: bool,
    pub current_wait: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_average: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct WaitSummary {
    pub total_attractions: usize,
    pub open_attractions: usize,
    /// Mean wait over open attractions that report a positive wait.
    pub average_wait: f32,
    pub max_wait: u32,
}

impl WaitSummary {
    pub fn from_attractions(attractions: &[Attraction]) -> Self {
        let open: Vec<&Attraction> = attractions.iter().filter(|a| a.is_open).collect();
        let waits: Vec<u32> = open
            .iter()
            .map(|a| a.current_wait)
            .filter(|w| *w > 0)
            .collect();

        let average_wait = if waits.is_empty() {
            0.0
        } else {
            let mean = waits.iter().map(|w| *w as f32).sum::<f32>() / waits.len() as f32;
            (mean * 10.0).round() / 10.0
        };

        Self {
            total_attractions: attractions.len(),
            open_attractions: open.len(),
            average_wait,
            max_wait: waits.iter().copied().max().unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ParkWaitTimes {
    pub park_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub park_name: Option<String>,
    pub source: String,
    pub is_demo: bool,
    pub last_updated: DateTime<Utc>,
    pub attractions: Vec<Attraction>,
    pub summary: WaitSummary,
}

impl ParkWaitTimes {
    pub fn new(
        park_id: impl Into<String>,
        park_name: Option<String>,
        source: impl Into<String>,
        is_demo: bool,
        attractions: Vec<Attraction>,
    ) -> Self {
        let summary = WaitSummary::from_attractions(&attractions);
        Self {
            park_id: park_id.into(),
            park_name,
            source: source.into(),
            is_demo,
            last_updated: Utc::now(),
            attractions,
            summary,
        }
    }

    pub fn find(&self, attraction_id: &str) -> Option<&Attraction> {
        self.attractions.iter().find(|a| a.id == attraction_id)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CrowdPrediction {
    pub park_id: String,
    pub date: NaiveDate,
    pub crowd_index: u8,
    pub crowd_description: String,
    pub prediction_confidence: f32,
    pub peak_times: Vec<String>,
    pub best_visit_times: Vec<String>,
    pub estimated_wait_multiplier: f32,
    pub data_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_stats: Option<WaitSummary>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlanRequest {
    #[serde(default)]
    pub park_id: Option<String>,
    #[serde(default)]
    pub selected_attractions: Vec<String>,
    #[serde(default)]
    pub visit_date: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PlannedAttraction {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land: Option<String>,
    pub thrill_level: ThrillLevel,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PlanItem {
    pub order: usize,
    pub attraction: PlannedAttraction,
    pub recommended_time: String,
    pub estimated_wait: u32,
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TouringPlan {
    pub park_id: String,
    pub visit_date: NaiveDate,
    pub arrival_time: String,
    pub crowd_level: u8,
    pub crowd_description: String,
    pub total_attractions: usize,
    pub estimated_total_minutes: u32,
    pub estimated_total_time: String,
    pub plan: Vec<PlanItem>,
    pub general_tips: Vec<String>,
    pub skipped_attractions: Vec<String>,
    pub data_source: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ParkDetails {
    pub park: ThemePark,
    pub attractions: Vec<Attraction>,
    pub wait_summary: WaitSummary,
    pub crowd_prediction_today: CrowdPrediction,
}

#[derive(Debug, Serialize, Clone)]
pub struct ParkComparison {
    pub park_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub park_name: Option<String>,
    pub source: String,
    pub crowd_index: u8,
    pub crowd_description: String,
    pub average_wait: f32,
    pub max_wait: u32,
    pub open_attractions: usize,
    pub is_demo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ride(id: &str, open: bool, wait: u32) -> Attraction {
        Attraction {
            id: id.to_string(),
            name: id.to_string(),
            land: None,
            thrill_level: ThrillLevel::Unknown,
            height_requirement: None,
            fastpass_available: false,
            status: if open {
                AttractionStatus::Operational
            } else {
                AttractionStatus::Closed
            },
            is_open: open,
            current_wait: wait,
            historical_average: None,
            last_updated: None,
        }
    }

    #[test]
    fn summary_ignores_closed_and_zero_waits() {
        let rides = vec![
            ride("a", true, 30),
            ride("b", true, 0),
            ride("c", false, 90),
            ride("d", true, 45),
        ];
        let summary = WaitSummary::from_attractions(&rides);
        assert_eq!(summary.total_attractions, 4);
        assert_eq!(summary.open_attractions, 3);
        assert_eq!(summary.average_wait, 37.5);
        assert_eq!(summary.max_wait, 45);
    }

    #[test]
    fn source_round_trips_through_strings() {
        assert_eq!("queue_times".parse::<WaitSource>(), Ok(WaitSource::QueueTimes));
        assert_eq!("waittimes-app".parse::<WaitSource>(), Ok(WaitSource::WaitTimesApp));
        assert_eq!(
            serde_json::to_value(WaitSource::WaitTimesApp).unwrap(),
            "waittimes-app"
        );
        assert_eq!(WaitSource::QueueTimes.demo_label(), "queue-times-demo");
    }

    #[test]
    fn thrill_labels() {
        assert_eq!(ThrillLevel::from_label("EXTREME"), ThrillLevel::Thrill);
        assert_eq!(ThrillLevel::from_label("family"), ThrillLevel::Family);
        assert_eq!(ThrillLevel::from_label("moderate"), ThrillLevel::Moderate);
        assert_eq!(ThrillLevel::from_label(""), ThrillLevel::Unknown);
    }
}
