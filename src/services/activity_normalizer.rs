//! Activity Normalizer
//!
//! Gathers raw activities from every configured [`ActivitySource`]
//! concurrently and turns them into schedulable [`Activity`] records:
//!
//! - missing fields are filled with defaults (address falls back to the
//!   destination, duration to two hours, best time to "Anytime")
//! - duplicates with the same name and address across sources are merged
//! - every activity is tagged with one of the requested interests, or
//!   `general` when nothing matches
//!
//! A failing source is logged and skipped. When every source fails the result
//! is simply empty.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use chrono::Utc;
use futures::future::join_all;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::models::activity::{
    Activity, RawActivity, Restaurant, TimeOfDay, DEFAULT_PRIORITY, GENERAL_CATEGORY,
};
use crate::models::itinerary::DestinationData;
use crate::services::activity_sources::{ActivitySource, SourceBundle};

pub const DEFAULT_DURATION: &str = "2 hours";
pub const DEFAULT_DURATION_MINUTES: u32 = 120;
pub const DEFAULT_BEST_TIME: &str = "Anytime";

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:(?:-|–|to)\s*\d+(?:\.\d+)?\s*)?(hours?|hrs?|h|minutes?|mins?|m)\b")
        .expect("duration pattern is valid")
});

/// Parse "3-4 hours", "1.5 hours" or "30-60 minutes" into minutes, taking the
/// lower bound of a range.
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let lowered = text.to_lowercase();
    if lowered.contains("full day") || lowered.contains("all day") {
        return Some(480);
    }
    if lowered.contains("half day") || lowered.contains("half-day") {
        return Some(240);
    }

    let caps = DURATION.captures(&lowered)?;
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();
    let minutes = if unit.starts_with('h') {
        amount * 60.0
    } else {
        amount
    };

    Some(minutes.round() as u32).filter(|m| *m > 0)
}

/// Keywords that mark free text as belonging to an interest.
pub fn interest_keywords(interest: &str) -> &'static [&'static str] {
    let interest = interest.to_lowercase();
    match interest.as_str() {
        i if i.contains("museum") => &["museum", "gallery", "exhibit", "collection", "art "],
        i if i.contains("dining") || i.contains("food") => &[
            "restaurant",
            "food",
            "dining",
            "cuisine",
            "street food",
            "bistro",
            "cafe",
            "market",
        ],
        i if i.contains("historic") || i.contains("landmark") => &[
            "historic",
            "monument",
            "landmark",
            "castle",
            "cathedral",
            "ancient",
            "palace",
        ],
        i if i.contains("scenic") => &[
            "scenic drive",
            "road trip",
            "coastal drive",
            "lookout",
            "viewpoint",
        ],
        i if i.contains("hike") => &["hike", "hiking", "trail", "summit", "trek"],
        i if i.contains("beach") => &["beach", "shore", "coast", "sand", "snorkel"],
        i if i.contains("theme park") => &["theme park", "amusement", "roller coaster", "rides"],
        i if i.contains("family") => &[
            "family",
            "kids",
            "children",
            "playground",
            "zoo",
            "aquarium",
        ],
        i if i.contains("outdoor") => &["outdoor", "nature", "park", "garden", "kayak", "mountain"],
        i if i.contains("solo female") => &["solo travel", "women", "female", "well-lit"],
        i if i.contains("cultur") => &[
            "temple",
            "culture",
            "cultural",
            "tradition",
            "ceremony",
            "tango",
        ],
        i if i.contains("nightlife") => &["bar", "club", "nightlife", "live music", "cocktail"],
        i if i.contains("shopping") => &["shopping", "boutique", "market", "shop"],
        _ => &[],
    }
}

fn normalize_key_part(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn dedupe_key(name: &str, address: &str) -> String {
    format!("{}|{}", normalize_key_part(name), normalize_key_part(address))
}

fn slug(s: &str) -> String {
    normalize_key_part(s).replace(' ', "-")
}

/// Pick the requested interest an activity belongs to. A category that
/// matches an interest wins over keyword hits in the name or description.
pub fn tag_category(
    raw_category: Option<&str>,
    name: &str,
    description: &str,
    interests: &[String],
) -> String {
    let category = raw_category.map(str::to_lowercase).unwrap_or_default();

    if !category.is_empty() {
        for interest in interests {
            let wanted = interest.trim().to_lowercase();
            if wanted.is_empty() {
                continue;
            }
            if category == wanted || category.contains(&wanted) || wanted.contains(&category) {
                return interest.trim().to_string();
            }
        }
    }

    let text = format!("{} {} {} ", name, description, category).to_lowercase();
    for interest in interests {
        if interest_keywords(interest)
            .iter()
            .any(|keyword| text.contains(keyword))
        {
            return interest.trim().to_string();
        }
    }

    GENERAL_CATEGORY.to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fill defaults, tag, and merge duplicates. Records without a name are
/// dropped since there is nothing to show for them.
pub fn normalize_activities(
    raw: Vec<RawActivity>,
    destination: &str,
    interests: &[String],
) -> Vec<Activity> {
    let mut activities: Vec<Activity> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();
    let mut ids: HashSet<String> = HashSet::new();

    for item in raw {
        let Some(name) = non_empty(item.name) else {
            debug!("Dropping unnamed activity from {:?}", item.source);
            continue;
        };
        let address = non_empty(item.address).unwrap_or_else(|| destination.trim().to_string());
        let key = dedupe_key(&name, &address);

        if let Some(&existing) = by_key.get(&key) {
            let kept = &mut activities[existing];
            if kept.description.is_empty() {
                kept.description = non_empty(item.description).unwrap_or_default();
            }
            if kept.location.is_none() {
                kept.location = item.location;
            }
            if kept.solo_female_notes.is_none() {
                kept.solo_female_notes = non_empty(item.solo_female_notes);
            }
            if kept.source_url.is_none() {
                kept.source_url = non_empty(item.source_url);
            }
            continue;
        }

        let description = non_empty(item.description).unwrap_or_default();
        let category = tag_category(item.category.as_deref(), &name, &description, interests);
        let estimated_duration =
            non_empty(item.estimated_duration).unwrap_or_else(|| DEFAULT_DURATION.to_string());
        let duration_minutes =
            parse_duration_minutes(&estimated_duration).unwrap_or(DEFAULT_DURATION_MINUTES);
        let best_time = non_empty(item.best_time).unwrap_or_else(|| DEFAULT_BEST_TIME.to_string());

        let base_id = format!("{}-{}", slug(destination), slug(&name));
        let mut id = base_id.clone();
        let mut n = 2;
        while !ids.insert(id.clone()) {
            id = format!("{}-{}", base_id, n);
            n += 1;
        }

        by_key.insert(key, activities.len());
        activities.push(Activity {
            id,
            name,
            category,
            description,
            address,
            location: item.location,
            estimated_duration,
            duration_minutes,
            time_of_day: TimeOfDay::from_hint(&best_time),
            best_time,
            solo_female_notes: non_empty(item.solo_female_notes),
            is_custom: false,
            priority: DEFAULT_PRIORITY,
            source: non_empty(item.source),
            source_url: non_empty(item.source_url),
        });
    }

    activities
}

fn dedupe_restaurants(restaurants: Vec<Restaurant>) -> Vec<Restaurant> {
    let mut seen = HashSet::new();
    restaurants
        .into_iter()
        .filter(|r| seen.insert(normalize_key_part(&r.name)))
        .collect()
}

fn dedupe_tips(tips: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tips.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .collect()
}

pub struct ActivityNormalizer {
    sources: Vec<Arc<dyn ActivitySource>>,
}

impl ActivityNormalizer {
    pub fn new(sources: Vec<Arc<dyn ActivitySource>>) -> Self {
        Self { sources }
    }

    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// Query every source concurrently and normalise the combined output.
    pub async fn gather(&self, destination: &str, interests: &[String]) -> DestinationData {
        let results = join_all(
            self.sources
                .iter()
                .map(|source| source.fetch(destination, interests)),
        )
        .await;

        let mut combined = SourceBundle::default();
        let mut used = Vec::new();
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(bundle) => {
                    debug!(
                        "{} returned {} activities for {}",
                        source.name(),
                        bundle.activities.len(),
                        destination
                    );
                    if !bundle.is_empty() {
                        used.push(source.name().to_string());
                    }
                    combined.merge(bundle);
                }
                Err(e) => warn!(
                    "Activity source {} failed for {}: {}",
                    source.name(),
                    destination,
                    e
                ),
            }
        }

        let activities = normalize_activities(combined.activities, destination, interests);
        info!(
            "Normalized {} activities for {} from {:?}",
            activities.len(),
            destination,
            used
        );

        DestinationData {
            destination: destination.trim().to_string(),
            interests: interests.to_vec(),
            activities,
            restaurants: dedupe_restaurants(combined.restaurants),
            local_tips: dedupe_tips(combined.local_tips),
            sources: used,
            last_updated: Utc::now(),
        }
    }

    pub async fn activities_for(&self, destination: &str, interests: &[String]) -> Vec<Activity> {
        self.gather(destination, interests).await.activities
    }
}
