use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::numbers::{deserialize_optional_rounded_u32, deserialize_optional_rounded_u8};

pub const DEFAULT_PRIORITY: u8 = 3;
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;
pub const CUSTOM_CATEGORY: &str = "custom";
pub const GENERAL_CATEGORY: &str = "general";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Coarse time-of-day bucket used to order a day's activities.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Anytime,
}

impl TimeOfDay {
    /// Classify a free-text hint such as "Early morning", "Sunset" or
    /// "10:00 AM - 12:00 PM". The earliest recognisable cue in the text wins.
    pub fn from_hint(hint: &str) -> Self {
        let text = hint.to_lowercase();
        let mut best: Option<(usize, TimeOfDay)> = None;
        let mut consider = |pos: usize, slot: TimeOfDay| {
            if best.map_or(true, |(p, _)| pos < p) {
                best = Some((pos, slot));
            }
        };

        let cues: [(&str, TimeOfDay); 10] = [
            ("morning", TimeOfDay::Morning),
            ("sunrise", TimeOfDay::Morning),
            ("breakfast", TimeOfDay::Morning),
            ("opening", TimeOfDay::Morning),
            ("afternoon", TimeOfDay::Afternoon),
            ("lunch", TimeOfDay::Afternoon),
            ("midday", TimeOfDay::Afternoon),
            ("evening", TimeOfDay::Evening),
            ("sunset", TimeOfDay::Evening),
            ("night", TimeOfDay::Evening),
        ];
        for (cue, slot) in cues {
            if let Some(pos) = text.find(cue) {
                consider(pos, slot);
            }
        }
        if let Some(pos) = text.find("dinner") {
            consider(pos, TimeOfDay::Evening);
        }
        if let Some((pos, hour)) = first_clock_hour(&text) {
            let slot = match hour {
                0..=11 => TimeOfDay::Morning,
                12..=16 => TimeOfDay::Afternoon,
                _ => TimeOfDay::Evening,
            };
            consider(pos, slot);
        }

        best.map(|(_, slot)| slot).unwrap_or(TimeOfDay::Anytime)
    }
}

static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})(?::\d{2})?\s*([ap])\.?m\b").expect("clock time pattern is valid")
});

// First "10 am" / "3:30 p.m." style reading in lowercased text, as its byte
// offset and the hour on a 24h clock.
fn first_clock_hour(text: &str) -> Option<(usize, u32)> {
    CLOCK_TIME.captures_iter(text).find_map(|caps| {
        let start = caps.get(0)?.start();
        let hour = caps[1].parse::<u32>().ok().filter(|h| (1..=12).contains(h))?;
        let hour = if &caps[2] == "p" { hour % 12 + 12 } else { hour % 12 };
        Some((start, hour))
    })
}

/// A normalised, schedulable activity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: Option<Coordinates>,
    pub estimated_duration: String,
    pub duration_minutes: u32,
    pub best_time: String,
    pub time_of_day: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solo_female_notes: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Whatever an activity source managed to extract. Every field may be absent.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RawActivity {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub location: Option<Coordinates>,
    pub estimated_duration: Option<String>,
    pub best_time: Option<String>,
    pub solo_female_notes: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
}

/// A caller-supplied activity from the itinerary request.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CustomActivityInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub estimated_duration: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_rounded_u32")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub best_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_rounded_u8")]
    pub priority: Option<u8>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Restaurant {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

pub fn clamp_priority(priority: Option<u8>) -> u8 {
    priority
        .unwrap_or(DEFAULT_PRIORITY)
        .clamp(MIN_PRIORITY, MAX_PRIORITY)
}
