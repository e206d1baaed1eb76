//! Greedy touring-plan builder for a single park day.
//!
//! Selected attractions are visited shortest queue first. Each one gets a
//! slot starting at the arrival time; the clock advances by the attraction's
//! current wait plus a fixed overhead for walking and boarding. There are no
//! time windows, reopenings or walking distances in the model.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::error::AppError;
use crate::models::human_duration;
use crate::models::theme_park::{
    Attraction, CrowdPrediction, ParkWaitTimes, PlanItem, PlannedAttraction, ThrillLevel,
    TouringPlan,
};

pub const DEFAULT_ARRIVAL: &str = "08:00";

const ARRIVAL_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

#[derive(Debug, Clone)]
pub struct TouringPlanConfig {
    /// Minutes added after every attraction for walking and boarding.
    pub overhead_minutes: u32,
    /// Waits above this earn an off-peak tip.
    pub high_wait_threshold: u32,
    /// Crowd index at which the day counts as busy.
    pub busy_crowd_level: u8,
}

impl Default for TouringPlanConfig {
    fn default() -> Self {
        Self {
            overhead_minutes: 15,
            high_wait_threshold: 60,
            busy_crowd_level: 7,
        }
    }
}

pub struct TouringPlanOptimizer {
    config: TouringPlanConfig,
}

impl Default for TouringPlanOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts 24-hour (`08:30`) and 12-hour (`8:30 AM`) clock times.
pub fn parse_arrival_time(raw: Option<&str>) -> Result<NaiveTime, AppError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_ARRIVAL);
    let normalized = raw.to_uppercase();
    ARRIVAL_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
        .ok_or_else(|| {
            AppError::validation(format!(
                "Invalid arrival_time '{}', expected a time like 08:30 or 8:30 AM",
                raw
            ))
        })
}

impl TouringPlanOptimizer {
    pub fn new() -> Self {
        Self::with_config(TouringPlanConfig::default())
    }

    pub fn with_config(config: TouringPlanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TouringPlanConfig {
        &self.config
    }

    fn attraction_tips(&self, attraction: &Attraction, crowd_index: u8) -> Vec<String> {
        let mut tips = Vec::new();

        if attraction.current_wait > self.config.high_wait_threshold {
            tips.push("High wait time - consider visiting during off-peak hours".to_string());
        }
        if attraction.fastpass_available {
            tips.push(
                "Fast pass available - book a return time to skip most of the queue".to_string(),
            );
        }
        if let Some(height) = &attraction.height_requirement {
            tips.push(format!("Height requirement: {}", height));
        }
        match attraction.thrill_level {
            ThrillLevel::Thrill => {
                tips.push("Intense ride - check the health advisories before queueing".to_string())
            }
            ThrillLevel::Family => tips.push("Suitable for all ages".to_string()),
            ThrillLevel::Moderate | ThrillLevel::Unknown => {}
        }
        if crowd_index >= self.config.busy_crowd_level {
            tips.push("Very crowded day - arrive early for shorter waits".to_string());
        }
        if let Some(land) = &attraction.land {
            tips.push(format!("Located in {}", land));
        }

        tips
    }

    fn general_tips(&self, waits: &ParkWaitTimes, crowd: &CrowdPrediction) -> Vec<String> {
        let mut tips = vec![format!("Current crowd level: {}", crowd.crowd_description)];
        if !crowd.best_visit_times.is_empty() {
            tips.push(format!("Best times to visit: {}", crowd.best_visit_times.join(", ")));
        }
        if !crowd.peak_times.is_empty() {
            tips.push(format!("Avoid peak times: {}", crowd.peak_times.join(", ")));
        }
        if crowd.crowd_index >= self.config.busy_crowd_level {
            tips.push(
                "Arrive before opening and head to the longest queues you selected last"
                    .to_string(),
            );
        }
        if waits.is_demo {
            tips.push(
                "Live wait times are unavailable - this plan uses demonstration data".to_string(),
            );
        } else {
            tips.push(format!("Wait times from {}, refreshed every 5 minutes", waits.source));
        }
        tips
    }

    /// Order the selected attractions by ascending current wait and assign
    /// visit slots from `arrival`. Closed or unknown ids are reported in
    /// `skipped_attractions`.
    pub fn build_plan(
        &self,
        waits: &ParkWaitTimes,
        crowd: &CrowdPrediction,
        selected: &[String],
        visit_date: NaiveDate,
        arrival: NaiveTime,
    ) -> Result<TouringPlan, AppError> {
        if selected.is_empty() {
            return Err(AppError::validation("At least one attraction must be selected"));
        }

        let mut seen = HashSet::new();
        let mut chosen: Vec<&Attraction> = Vec::new();
        let mut skipped = Vec::new();
        for id in selected {
            if !seen.insert(id.as_str()) {
                continue;
            }
            match waits.find(id) {
                Some(attraction) if attraction.is_open => chosen.push(attraction),
                _ => {
                    debug!("skipping attraction {} (closed or unknown)", id);
                    skipped.push(id.clone());
                }
            }
        }

        if chosen.is_empty() {
            return Err(AppError::validation(
                "No valid attractions selected or all attractions are closed",
            ));
        }

        // stable: equal waits keep selection order
        chosen.sort_by_key(|a| a.current_wait);

        let mut clock = visit_date.and_time(arrival);
        let mut total_minutes = 0u32;
        let plan: Vec<PlanItem> = chosen
            .into_iter()
            .enumerate()
            .map(|(i, attraction)| {
                let item = PlanItem {
                    order: i + 1,
                    attraction: PlannedAttraction {
                        id: attraction.id.clone(),
                        name: attraction.name.clone(),
                        land: attraction.land.clone(),
                        thrill_level: attraction.thrill_level,
                    },
                    recommended_time: clock.format("%I:%M %p").to_string(),
                    estimated_wait: attraction.current_wait,
                    tips: self.attraction_tips(attraction, crowd.crowd_index),
                };
                let step = attraction.current_wait + self.config.overhead_minutes;
                total_minutes += step;
                clock += chrono::Duration::minutes(step as i64);
                item
            })
            .collect();

        Ok(TouringPlan {
            park_id: waits.park_id.clone(),
            visit_date,
            arrival_time: arrival.format("%I:%M %p").to_string(),
            crowd_level: crowd.crowd_index,
            crowd_description: crowd.crowd_description.clone(),
            total_attractions: plan.len(),
            estimated_total_minutes: total_minutes,
            estimated_total_time: human_duration(total_minutes),
            plan,
            general_tips: self.general_tips(waits, crowd),
            skipped_attractions: skipped,
            data_source: waits.source.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::theme_park::AttractionStatus;
    use crate::services::crowd_predictor::predict_from_waits;

    fn ride(id: &str, wait: u32, open: bool) -> Attraction {
        Attraction {
            id: id.to_string(),
            name: format!("Ride {}", id),
            land: Some("Main Street".to_string()),
            thrill_level: ThrillLevel::Moderate,
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

    fn park() -> ParkWaitTimes {
        ParkWaitTimes::new(
            "6",
            Some("Test Park".to_string()),
            "queue-times",
            false,
            vec![
                ride("a", 45, true),
                ride("b", 5, true),
                ride("c", 20, true),
                ride("d", 10, false),
                ride("e", 20, true),
            ],
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn orders_by_ascending_wait() {
        let waits = park();
        let crowd = predict_from_waits(&waits, date());
        let plan = TouringPlanOptimizer::new()
            .build_plan(
                &waits,
                &crowd,
                &ids(&["a", "e", "b", "c"]),
                date(),
                parse_arrival_time(None).unwrap(),
            )
            .unwrap();

        let order: Vec<&str> = plan.plan.iter().map(|p| p.attraction.id.as_str()).collect();
        assert_eq!(order, vec!["b", "e", "c", "a"]);
        assert!(plan
            .plan
            .windows(2)
            .all(|w| w[0].estimated_wait <= w[1].estimated_wait));
        assert_eq!(plan.plan[0].order, 1);
    }

    #[test]
    fn slots_advance_by_wait_plus_overhead() {
        let waits = park();
        let crowd = predict_from_waits(&waits, date());
        let arrival = parse_arrival_time(Some("9:00 am")).unwrap();
        let plan = TouringPlanOptimizer::new()
            .build_plan(&waits, &crowd, &ids(&["b", "c"]), date(), arrival)
            .unwrap();

        assert_eq!(plan.plan[0].recommended_time, "09:00 AM");
        // 5 minute wait + 15 overhead
        assert_eq!(plan.plan[1].recommended_time, "09:20 AM");
        assert_eq!(plan.estimated_total_minutes, 5 + 15 + 20 + 15);
        assert_eq!(plan.estimated_total_time, "55 minutes");
    }

    #[test]
    fn closed_and_unknown_are_skipped() {
        let waits = park();
        let crowd = predict_from_waits(&waits, date());
        let plan = TouringPlanOptimizer::new()
            .build_plan(
                &waits,
                &crowd,
                &ids(&["d", "zzz", "a", "a"]),
                date(),
                parse_arrival_time(None).unwrap(),
            )
            .unwrap();

        assert_eq!(plan.total_attractions, 1);
        assert_eq!(plan.skipped_attractions, ids(&["d", "zzz"]));
    }

    #[test]
    fn nothing_open_is_a_validation_error() {
        let waits = park();
        let crowd = predict_from_waits(&waits, date());
        let optimizer = TouringPlanOptimizer::new();
        let arrival = parse_arrival_time(None).unwrap();

        assert!(matches!(
            optimizer.build_plan(&waits, &crowd, &[], date(), arrival),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            optimizer.build_plan(&waits, &crowd, &ids(&["d"]), date(), arrival),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn arrival_formats() {
        assert_eq!(
            parse_arrival_time(Some("08:30")).unwrap(),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!(
            parse_arrival_time(Some("1:15 PM")).unwrap(),
            NaiveTime::from_hms_opt(13, 15, 0).unwrap()
        );
        assert!(parse_arrival_time(Some("soon")).is_err());
    }

    #[test]
    fn long_waits_get_tips() {
        let mut waits = park();
        waits.attractions[0].current_wait = 75;
        waits.attractions[0].fastpass_available = true;
        let crowd = predict_from_waits(&waits, date());
        let plan = TouringPlanOptimizer::new()
            .build_plan(&waits, &crowd, &ids(&["a"]), date(), parse_arrival_time(None).unwrap())
            .unwrap();

        let tips = &plan.plan[0].tips;
        assert!(tips.iter().any(|t| t.starts_with("High wait time")));
        assert!(tips.iter().any(|t| t.starts_with("Fast pass")));
        assert!(tips.iter().any(|t| t == "Located in Main Street"));
    }
}
