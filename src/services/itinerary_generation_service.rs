use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::activity::{
    clamp_priority, Activity, CustomActivityInput, TimeOfDay, CUSTOM_CATEGORY,
};
use crate::models::destination::Destination;
use crate::models::human_duration;
use crate::models::itinerary::{BudgetTier, Day, Itinerary, ItineraryRequest};
use crate::services::activity_normalizer::{
    dedupe_key, parse_duration_minutes, ActivityNormalizer, DEFAULT_BEST_TIME,
    DEFAULT_DURATION, DEFAULT_DURATION_MINUTES,
};
use crate::services::destination_catalog;

const MAX_ACTIVITIES_PER_DAY: usize = 4;
const CLUSTER_RADIUS_KM: f64 = 3.0;
const MAX_TRIP_DAYS: u32 = 30;

#[derive(Clone, Debug)]
pub struct ItineraryGenerationConfig {
    pub max_activities_per_day: usize,
    pub cluster_radius_km: f64,
    pub max_trip_days: u32,
}

impl Default for ItineraryGenerationConfig {
    fn default() -> Self {
        Self {
            max_activities_per_day: MAX_ACTIVITIES_PER_DAY,
            cluster_radius_km: CLUSTER_RADIUS_KM,
            max_trip_days: MAX_TRIP_DAYS,
        }
    }
}

/// An itinerary request that passed validation.
#[derive(Debug, Clone)]
pub struct TripRequest {
    /// Destination names as the caller wrote them.
    pub destinations: Vec<String>,
    /// Catalog entries for the destinations we recognise.
    pub resolved: Vec<Destination>,
    pub interests: Vec<String>,
    pub day_count: u32,
    pub dates: Option<Vec<NaiveDate>>,
    pub solo_female_traveler: bool,
    pub budget: Option<BudgetTier>,
    pub custom_activities: Vec<Activity>,
}

impl TripRequest {
    pub fn label(&self) -> String {
        self.destinations
            .iter()
            .map(|name| {
                destination_catalog::find_destination(name)
                    .map(|d| d.label())
                    .unwrap_or_else(|| name.clone())
            })
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

fn split_destinations(request: &ItineraryRequest) -> Vec<String> {
    let mut seen = HashSet::new();
    request
        .destination
        .split(|c: char| c == '&' || c == ';')
        .chain(request.destinations.iter().map(String::as_str))
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .filter(|d| seen.insert(d.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn custom_activity(index: usize, input: &CustomActivityInput) -> Result<Activity, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!(
            "Custom activity #{} needs a name",
            index + 1
        )));
    }

    let estimated_duration = input
        .estimated_duration
        .clone()
        .filter(|d| !d.trim().is_empty())
        .or_else(|| input.duration_minutes.map(human_duration))
        .unwrap_or_else(|| DEFAULT_DURATION.to_string());
    let duration_minutes = input
        .duration_minutes
        .or_else(|| parse_duration_minutes(&estimated_duration))
        .unwrap_or(DEFAULT_DURATION_MINUTES);
    let best_time = input
        .best_time
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BEST_TIME.to_string());

    Ok(Activity {
        id: format!("custom-{}", index + 1),
        name: name.to_string(),
        category: CUSTOM_CATEGORY.to_string(),
        description: input.description.clone().unwrap_or_default(),
        address: input.address.clone().unwrap_or_default(),
        location: input.location,
        estimated_duration,
        duration_minutes,
        time_of_day: TimeOfDay::from_hint(&best_time),
        best_time,
        solo_female_notes: None,
        is_custom: true,
        priority: clamp_priority(input.priority),
        source: Some("user".to_string()),
        source_url: None,
    })
}

/// Check an itinerary request and resolve its destinations. Nothing is
/// generated for a request that fails here.
pub fn validate_request(
    request: &ItineraryRequest,
    max_trip_days: u32,
) -> Result<TripRequest, AppError> {
    let destinations = split_destinations(request);
    if destinations.is_empty() {
        return Err(AppError::validation("Destination is required"));
    }

    let mut seen = HashSet::new();
    let interests: Vec<String> = request
        .interests
        .iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty() && seen.insert(i.to_lowercase()))
        .collect();
    if interests.is_empty() {
        return Err(AppError::validation("At least one interest must be selected"));
    }

    let travel_dates = request
        .travel_dates
        .as_ref()
        .filter(|dates| !dates.is_empty());
    let (day_count, dates) = match (travel_dates, request.number_of_days) {
        (Some(_), Some(_)) => {
            return Err(AppError::validation(
                "Provide either travel_dates or number_of_days, not both",
            ))
        }
        (None, None) => {
            return Err(AppError::validation(
                "Either travel_dates or number_of_days is required",
            ))
        }
        (Some(raw), None) => {
            let dates = raw
                .iter()
                .map(|d| {
                    NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").map_err(|_| {
                        AppError::validation(format!(
                            "Invalid travel date '{}', expected YYYY-MM-DD",
                            d
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            (dates.len() as u32, Some(dates))
        }
        (None, Some(days)) => (days, None),
    };
    if day_count == 0 || day_count > max_trip_days {
        return Err(AppError::validation(format!(
            "Trips must be between 1 and {} days",
            max_trip_days
        )));
    }

    let resolved: Vec<Destination> = destinations
        .iter()
        .filter_map(|d| destination_catalog::find_destination(d))
        .collect();
    if let Some(first) = resolved.first() {
        if let Some(other) = resolved.iter().find(|d| d.continent != first.continent) {
            return Err(AppError::validation(format!(
                "All destinations must be on the same continent: {} is in {} but {} is in {}",
                first.label(),
                first.continent,
                other.label(),
                other.continent
            )));
        }
    }

    let budget = request
        .budget_range
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .map(|b| b.parse::<BudgetTier>().map_err(AppError::Validation))
        .transpose()?;

    let custom_activities = request
        .custom_activities
        .iter()
        .enumerate()
        .map(|(i, input)| custom_activity(i, input))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TripRequest {
        destinations,
        resolved,
        interests,
        day_count,
        dates,
        solo_female_traveler: request.solo_female_traveler,
        budget,
        custom_activities,
    })
}

fn haversine_distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = from.0.to_radians();
    let lat2_rad = to.0.to_radians();
    let delta_lat = (to.0 - from.0).to_radians();
    let delta_lon = (to.1 - from.1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

pub struct ItineraryGenerator {
    normalizer: Arc<ActivityNormalizer>,
    config: ItineraryGenerationConfig,
}

impl ItineraryGenerator {
    pub fn new(normalizer: Arc<ActivityNormalizer>) -> Self {
        Self::with_config(normalizer, ItineraryGenerationConfig::default())
    }

    pub fn with_config(
        normalizer: Arc<ActivityNormalizer>,
        config: ItineraryGenerationConfig,
    ) -> Self {
        Self { normalizer, config }
    }

    pub fn config(&self) -> &ItineraryGenerationConfig {
        &self.config
    }

    /// Validate the request, gather activities for every destination
    /// concurrently and bucket them into days.
    pub async fn generate_itinerary(
        &self,
        request: &ItineraryRequest,
    ) -> Result<Itinerary, AppError> {
        let trip = validate_request(request, self.config.max_trip_days)?;

        let gathered = join_all(
            trip.destinations
                .iter()
                .map(|d| self.normalizer.activities_for(d, &trip.interests)),
        )
        .await;

        let mut seen = HashSet::new();
        let pool: Vec<Activity> = gathered
            .into_iter()
            .flatten()
            .filter(|a| seen.insert(dedupe_key(&a.name, &a.address)))
            .collect();
        debug!("Activity pool for {}: {} candidates", trip.label(), pool.len());

        let itinerary = self.build_itinerary(&trip, pool);
        info!(
            "Generated {}-day itinerary {} for {} with {} activities",
            itinerary.number_of_days,
            itinerary.id,
            itinerary.destination,
            itinerary.total_activities
        );
        Ok(itinerary)
    }

    /// Deterministic part of generation: filter the pool to the requested
    /// interests, cluster by proximity and spread clusters over the days.
    pub fn build_itinerary(&self, trip: &TripRequest, pool: Vec<Activity>) -> Itinerary {
        let wanted: HashSet<String> = trip.interests.iter().map(|i| i.to_lowercase()).collect();
        let matching: Vec<Activity> = pool
            .into_iter()
            .filter(|a| wanted.contains(&a.category.to_lowercase()))
            .collect();
        let candidate_count = matching.len();

        let activities: Vec<Activity> = trip
            .custom_activities
            .iter()
            .cloned()
            .chain(matching)
            .collect();

        let day_slots = self.assign_days(&activities, trip.day_count as usize);
        let scheduled_regular = day_slots
            .iter()
            .flatten()
            .filter(|i| !activities[**i].is_custom)
            .count();

        let safety_tips = destination_catalog::solo_female_guidelines().general_tips;
        let label = trip.label();
        let days: Vec<Day> = day_slots
            .into_iter()
            .enumerate()
            .map(|(n, slot)| {
                let day_activities: Vec<Activity> =
                    slot.into_iter().map(|i| activities[i].clone()).collect();
                let total: u32 = day_activities.iter().map(|a| a.duration_minutes).sum();
                let safety_notes = (trip.solo_female_traveler && !safety_tips.is_empty())
                    .then(|| safety_tips[n % safety_tips.len()].clone());

                Day {
                    day: n as u32 + 1,
                    date: trip
                        .dates
                        .as_ref()
                        .and_then(|dates| dates.get(n))
                        .map(|d| d.format("%Y-%m-%d").to_string()),
                    title: format!("Day {} in {}", n + 1, label),
                    activities: day_activities,
                    total_estimated_minutes: total,
                    total_estimated_time: human_duration(total),
                    safety_notes,
                }
            })
            .collect();

        let safety_rating = trip.resolved.iter().map(|d| d.safety_rating).min();
        let safety_notes = if trip.solo_female_traveler && !trip.resolved.is_empty() {
            Some(
                trip.resolved
                    .iter()
                    .map(|d| d.safety_notes.clone())
                    .collect::<Vec<_>>()
                    .join(" "),
            )
        } else {
            None
        };

        Itinerary {
            id: Uuid::new_v4().to_string(),
            destination: label,
            destinations: trip.destinations.clone(),
            continent: trip.resolved.first().map(|d| d.continent.clone()),
            interests: trip.interests.clone(),
            number_of_days: trip.day_count,
            total_activities: days.iter().map(|d| d.activities.len()).sum(),
            days,
            solo_female_traveler: trip.solo_female_traveler,
            budget_range: trip.budget,
            safety_rating,
            safety_notes,
            custom_activities_count: trip.custom_activities.len(),
            unscheduled_activities: candidate_count - scheduled_regular,
            created_at: Utc::now(),
        }
    }

    /// Greedy proximity clustering in pool order. An activity joins the first
    /// cluster whose seed is within the radius; activities without
    /// coordinates group by identical address.
    fn cluster_by_proximity(&self, activities: &[Activity]) -> Vec<Vec<usize>> {
        let mut clusters: Vec<Vec<usize>> = Vec::new();

        for (i, activity) in activities.iter().enumerate() {
            let home = clusters.iter_mut().find(|cluster| {
                let seed = &activities[cluster[0]];
                match (seed.location, activity.location) {
                    (Some(a), Some(b)) => {
                        haversine_distance_km((a.lat, a.lng), (b.lat, b.lng))
                            <= self.config.cluster_radius_km
                    }
                    (None, None) => {
                        !seed.address.is_empty()
                            && seed.address.to_lowercase() == activity.address.to_lowercase()
                    }
                    _ => false,
                }
            });
            match home {
                Some(cluster) => cluster.push(i),
                None => clusters.push(vec![i]),
            }
        }

        clusters
    }

    fn day_order(activities: &[Activity], a: usize, b: usize) -> std::cmp::Ordering {
        let (x, y) = (&activities[a], &activities[b]);
        y.priority
            .cmp(&x.priority)
            .then(x.time_of_day.cmp(&y.time_of_day))
            .then(a.cmp(&b))
    }

    /// Returns activity indexes per day. Custom activities are always placed;
    /// regular ones are dropped once every day is full.
    fn assign_days(&self, activities: &[Activity], day_count: usize) -> Vec<Vec<usize>> {
        let capacity = self.config.max_activities_per_day.max(1);
        let mut days: Vec<Vec<usize>> = vec![Vec::new(); day_count];
        if day_count == 0 {
            return days;
        }

        let mut chunks: Vec<Vec<usize>> = Vec::new();
        for mut cluster in self.cluster_by_proximity(activities) {
            cluster.sort_by(|a, b| Self::day_order(activities, *a, *b));
            chunks.extend(cluster.chunks(capacity).map(<[usize]>::to_vec));
        }
        let has_custom = |chunk: &Vec<usize>| chunk.iter().any(|i| activities[*i].is_custom);
        chunks.sort_by(|a, b| {
            has_custom(b)
                .cmp(&has_custom(a))
                .then(b.len().cmp(&a.len()))
        });

        let least_loaded = |days: &Vec<Vec<usize>>| {
            days.iter()
                .enumerate()
                .min_by_key(|(n, d)| (d.len(), *n))
                .map(|(n, _)| n)
                .unwrap_or(0)
        };

        let mut overflow = Vec::new();
        for chunk in chunks {
            let target = least_loaded(&days);
            for i in chunk {
                if activities[i].is_custom || days[target].len() < capacity {
                    days[target].push(i);
                } else {
                    overflow.push(i);
                }
            }
        }
        for i in overflow {
            let target = least_loaded(&days);
            if days[target].len() < capacity {
                days[target].push(i);
            }
        }

        for day in days.iter_mut() {
            day.sort_by(|a, b| Self::day_order(activities, *a, *b));
        }
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::Coordinates;

    fn generator() -> ItineraryGenerator {
        ItineraryGenerator::new(Arc::new(ActivityNormalizer::new(Vec::new())))
    }

    fn activity(name: &str, category: &str, lat: f64, lng: f64) -> Activity {
        Activity {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            category: category.to_string(),
            description: String::new(),
            address: String::new(),
            location: Some(Coordinates { lat, lng }),
            estimated_duration: "2 hours".to_string(),
            duration_minutes: 120,
            best_time: "Anytime".to_string(),
            time_of_day: TimeOfDay::Anytime,
            solo_female_notes: None,
            is_custom: false,
            priority: 3,
            source: None,
            source_url: None,
        }
    }

    fn request(json: serde_json::Value) -> ItineraryRequest {
        serde_json::from_value(json).unwrap()
    }

    fn trip(json: serde_json::Value) -> TripRequest {
        validate_request(&request(json), MAX_TRIP_DAYS).unwrap()
    }

    #[test]
    fn rejects_missing_destination_and_interests() {
        let err = validate_request(
            &request(serde_json::json!({"interests": ["museums"], "number_of_days": 2})),
            MAX_TRIP_DAYS,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = validate_request(
            &request(serde_json::json!({
                "destination": "Paris",
                "interests": [" "],
                "number_of_days": 2
            })),
            MAX_TRIP_DAYS,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "At least one interest must be selected");
    }

    #[test]
    fn dates_and_day_count_are_exclusive() {
        let both = request(serde_json::json!({
            "destination": "Paris", "interests": ["museums"],
            "number_of_days": 2, "travel_dates": ["2025-06-01"]
        }));
        assert!(validate_request(&both, MAX_TRIP_DAYS).is_err());

        let neither =
            request(serde_json::json!({"destination": "Paris", "interests": ["museums"]}));
        assert!(validate_request(&neither, MAX_TRIP_DAYS).is_err());

        let dates = trip(serde_json::json!({
            "destination": "Paris", "interests": ["museums"],
            "travel_dates": ["2025-06-01", "2025-06-02"]
        }));
        assert_eq!(dates.day_count, 2);

        let bad_date = request(serde_json::json!({
            "destination": "Paris", "interests": ["museums"], "travel_dates": ["June 1st"]
        }));
        assert!(validate_request(&bad_date, MAX_TRIP_DAYS).is_err());

        let too_long = request(serde_json::json!({
            "destination": "Paris", "interests": ["museums"], "number_of_days": 31
        }));
        assert!(validate_request(&too_long, MAX_TRIP_DAYS).is_err());
    }

    #[test]
    fn rejects_cross_continent_destinations() {
        let err = validate_request(
            &request(serde_json::json!({
                "destination": "Paris & Tokyo", "interests": ["museums"], "number_of_days": 4
            })),
            MAX_TRIP_DAYS,
        )
        .unwrap_err();
        assert!(err.to_string().contains("same continent"));

        let same = trip(serde_json::json!({
            "destination": "Paris", "destinations": ["London", "Atlantis"],
            "interests": ["museums"], "number_of_days": 4
        }));
        assert_eq!(same.destinations, vec!["Paris", "London", "Atlantis"]);
        assert_eq!(same.resolved.len(), 2);
    }

    #[test]
    fn produces_requested_day_count_with_no_activities() {
        let trip = trip(serde_json::json!({
            "destination": "Atlantis", "interests": ["beaches"], "number_of_days": 3,
            "custom_activities": [{"name": "Snorkel tour"}]
        }));
        let itinerary = generator().build_itinerary(&trip, Vec::new());
        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(itinerary.total_activities, 1);
        assert!(itinerary
            .days
            .iter()
            .flat_map(|d| &d.activities)
            .all(|a| a.is_custom));
    }

    #[test]
    fn groups_nearby_activities_into_the_same_day() {
        let trip = trip(serde_json::json!({
            "destination": "Paris", "interests": ["museums"], "number_of_days": 2
        }));
        let pool = vec![
            activity("Louvre", "museums", 48.8606, 2.3376),
            activity("Far Museum", "museums", 48.70, 2.10),
            activity("Orsay", "museums", 48.8600, 2.3266),
            activity("Far Gallery", "museums", 48.7010, 2.1010),
        ];
        let itinerary = generator().build_itinerary(&trip, pool);

        let names: Vec<Vec<&str>> = itinerary
            .days
            .iter()
            .map(|d| d.activities.iter().map(|a| a.name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["Louvre", "Orsay"], vec!["Far Museum", "Far Gallery"]]);
        assert_eq!(itinerary.days[0].total_estimated_minutes, 240);
        assert_eq!(itinerary.days[0].total_estimated_time, "4 hours");
    }

    #[test]
    fn custom_activities_survive_a_full_schedule() {
        let trip = trip(serde_json::json!({
            "destination": "Paris", "interests": ["museums"], "number_of_days": 1,
            "custom_activities": [
                {"name": "Cooking class", "priority": 5},
                {"name": "Meet friends", "priority": 1}
            ]
        }));
        let pool: Vec<Activity> = (0..6)
            .map(|i| activity(&format!("Museum {}", i), "museums", 48.86, 2.33))
            .collect();
        let itinerary = generator().build_itinerary(&trip, pool);

        let day = &itinerary.days[0];
        assert!(day.activities.iter().any(|a| a.name == "Cooking class"));
        assert!(day.activities.iter().any(|a| a.name == "Meet friends"));
        assert_eq!(day.activities.len(), MAX_ACTIVITIES_PER_DAY);
        assert_eq!(day.activities[0].name, "Cooking class");
        assert_eq!(itinerary.custom_activities_count, 2);
        assert_eq!(itinerary.unscheduled_activities, 4);
    }

    #[test]
    fn filters_pool_to_requested_interests() {
        let trip = trip(serde_json::json!({
            "destination": "Paris", "interests": ["museums", "dining"], "number_of_days": 3
        }));
        let pool = vec![
            activity("Louvre", "museums", 48.8606, 2.3376),
            activity("Eiffel Tower", "general", 48.8584, 2.2945),
            activity("Bistro", "dining", 48.8647, 2.3470),
        ];
        let itinerary = generator().build_itinerary(&trip, pool);
        assert_eq!(itinerary.days.len(), 3);
        for a in itinerary.days.iter().flat_map(|d| &d.activities) {
            assert!(["museums", "dining", "custom"].contains(&a.category.as_str()));
        }
        assert_eq!(itinerary.total_activities, 2);
    }

    #[test]
    fn assignment_is_deterministic() {
        let trip = trip(serde_json::json!({
            "destination": "Paris", "interests": ["museums"], "number_of_days": 3
        }));
        let pool: Vec<Activity> = (0..9)
            .map(|i| activity(&format!("Spot {}", i), "museums", 48.80 + i as f64 * 0.02, 2.30))
            .collect();
        let first = generator().build_itinerary(&trip, pool.clone());
        let second = generator().build_itinerary(&trip, pool);
        assert_eq!(first.days, second.days);
    }

    #[test]
    fn solo_travelers_get_safety_notes() {
        let trip = trip(serde_json::json!({
            "destination": "Tokyo", "interests": ["museums"], "number_of_days": 2,
            "solo_female_traveler": true, "budget_range": "luxury"
        }));
        let itinerary = generator().build_itinerary(&trip, Vec::new());
        assert_eq!(itinerary.safety_rating, Some(5));
        assert!(itinerary.safety_notes.is_some());
        assert!(itinerary.days.iter().all(|d| d.safety_notes.is_some()));
        assert_ne!(itinerary.days[0].safety_notes, itinerary.days[1].safety_notes);
        assert_eq!(itinerary.budget_range, Some(BudgetTier::Luxury));
    }
}
