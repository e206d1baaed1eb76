use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::theme_park::{
    ParkComparison, ParkDetails, PlanRequest, ThemePark, ThrillLevel, WaitSource,
};
use crate::services::destination_catalog::continent_for_country;
use crate::services::touring_plan_service::parse_arrival_time;
use crate::services::wait_times::WaitTimeProvider;
use crate::state::AppState;

pub const MAX_COMPARED_PARKS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct SourceQuery {
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AttractionQuery {
    source: Option<String>,
    thrill_level: Option<String>,
    fastpass_only: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    park_ids: Option<String>,
    date: Option<String>,
}

fn parse_source(raw: Option<&str>) -> Result<Option<WaitSource>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse().map(Some).map_err(AppError::Validation),
        None => Ok(None),
    }
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            AppError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
        None => Ok(Utc::now().date_naive()),
    }
}

fn with_continent(mut park: ThemePark) -> ThemePark {
    if park.continent.as_deref().map_or(true, str::is_empty) {
        park.continent = continent_for_country(&park.country).map(str::to_string);
    }
    park
}

fn provider<'a>(
    data: &'a AppState,
    park_id: &str,
    source: Option<&str>,
) -> Result<&'a dyn WaitTimeProvider, AppError> {
    let source = parse_source(source)?;
    Ok(data.wait_times.resolve(park_id, source).as_ref())
}

/*
    /api/theme-parks/parks
*/
pub async fn get_all_parks(data: web::Data<AppState>) -> HttpResponse {
    let parks: Vec<ThemePark> = data
        .wait_times
        .all_parks()
        .await
        .into_iter()
        .map(with_continent)
        .collect();
    HttpResponse::Ok().json(parks)
}

async fn source_parks(data: &AppState, source: WaitSource) -> HttpResponse {
    let parks: Vec<ThemePark> = data
        .wait_times
        .get(source)
        .list_parks()
        .await
        .into_iter()
        .map(with_continent)
        .collect();
    HttpResponse::Ok().json(parks)
}

/*
    /api/theme-parks/queue-times
*/
pub async fn get_queue_times_parks(data: web::Data<AppState>) -> HttpResponse {
    source_parks(&data, WaitSource::QueueTimes).await
}

/*
    /api/theme-parks/waittimes-app
*/
pub async fn get_waittimes_app_parks(data: web::Data<AppState>) -> HttpResponse {
    source_parks(&data, WaitSource::WaitTimesApp).await
}

/*
    /api/theme-parks/parks/{id}
*/
pub async fn get_park_details(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SourceQuery>,
) -> Result<HttpResponse, AppError> {
    let park_id = path.into_inner();
    let provider = provider(&data, &park_id, query.source.as_deref())?;

    // independent upstream calls
    let (park, waits) = futures::join!(provider.park(&park_id), provider.wait_times(&park_id));
    let park = park.ok_or_else(|| AppError::NotFound(format!("Park {} not found", park_id)))?;
    let waits = waits?;
    let crowd = provider
        .crowd_prediction(&park_id, Utc::now().date_naive())
        .await?;

    let park = with_continent(ThemePark {
        crowd_level: Some(crowd.crowd_index),
        crowd_description: Some(crowd.crowd_description.clone()),
        attraction_count: Some(waits.attractions.len()),
        ..park
    });

    Ok(HttpResponse::Ok().json(ParkDetails {
        park,
        wait_summary: waits.summary.clone(),
        attractions: waits.attractions,
        crowd_prediction_today: crowd,
    }))
}

/*
    /api/theme-parks/parks/{id}/attractions
*/
pub async fn get_park_attractions(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<AttractionQuery>,
) -> Result<HttpResponse, AppError> {
    let park_id = path.into_inner();
    let provider = provider(&data, &park_id, query.source.as_deref())?;
    let waits = provider.wait_times(&park_id).await?;

    let thrill = query
        .thrill_level
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(ThrillLevel::from_label);
    let fastpass_only = query.fastpass_only.unwrap_or(false);

    let attractions: Vec<_> = waits
        .attractions
        .into_iter()
        .filter(|a| thrill.map_or(true, |t| a.thrill_level == t))
        .filter(|a| !fastpass_only || a.fastpass_available)
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "park_id": park_id,
        "source": waits.source,
        "is_demo": waits.is_demo,
        "total": attractions.len(),
        "attractions": attractions,
    })))
}

/*
    /api/theme-parks/{id}/wait-times
*/
pub async fn get_wait_times(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SourceQuery>,
) -> Result<HttpResponse, AppError> {
    let park_id = path.into_inner();
    let waits = provider(&data, &park_id, query.source.as_deref())?
        .wait_times(&park_id)
        .await?;
    Ok(HttpResponse::Ok().json(waits))
}

/*
    /api/theme-parks/{id}/crowds/{date}
*/
pub async fn get_crowd_prediction(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<SourceQuery>,
) -> Result<HttpResponse, AppError> {
    let (park_id, date) = path.into_inner();
    let date = parse_date(Some(date.as_str()))?;
    let prediction = provider(&data, &park_id, query.source.as_deref())?
        .crowd_prediction(&park_id, date)
        .await?;
    Ok(HttpResponse::Ok().json(prediction))
}

/*
    /api/theme-parks/{id}/optimize-plan
*/
pub async fn optimize_plan(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SourceQuery>,
    input: web::Json<PlanRequest>,
) -> Result<HttpResponse, AppError> {
    let park_id = path.into_inner();
    let input = input.into_inner();
    if let Some(body_id) = input.park_id.as_deref().filter(|id| *id != park_id) {
        warn!("optimize-plan body names park {} but path has {}, using path", body_id, park_id);
    }

    let source = query.source.as_deref().or(input.source.as_deref());
    let provider = provider(&data, &park_id, source)?;
    let visit_date = parse_date(input.visit_date.as_deref())?;
    let arrival = parse_arrival_time(input.arrival_time.as_deref())?;

    let waits = provider.wait_times(&park_id).await?;
    let crowd = provider.crowd_prediction(&park_id, visit_date).await?;
    let plan = data.touring.build_plan(
        &waits,
        &crowd,
        &input.selected_attractions,
        visit_date,
        arrival,
    )?;

    info!(
        "Touring plan for park {}: {} attractions, {} skipped",
        park_id,
        plan.total_attractions,
        plan.skipped_attractions.len()
    );
    Ok(HttpResponse::Ok().json(plan))
}

/*
    /api/theme-parks/compare-parks
*/
pub async fn compare_parks(
    data: web::Data<AppState>,
    query: web::Query<CompareQuery>,
) -> Result<HttpResponse, AppError> {
    let park_ids: Vec<String> = query
        .park_ids
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if park_ids.is_empty() {
        return Err(AppError::validation("park_ids must list at least one park"));
    }
    if park_ids.len() > MAX_COMPARED_PARKS {
        return Err(AppError::validation(format!(
            "At most {} parks can be compared at once",
            MAX_COMPARED_PARKS
        )));
    }
    let date = parse_date(query.date.as_deref())?;

    let results = join_all(park_ids.iter().map(|park_id| {
        let provider = data.wait_times.resolve(park_id, None).clone();
        async move {
            let waits = provider.wait_times(park_id).await?;
            let crowd = provider.crowd_prediction(park_id, date).await?;
            Ok::<_, AppError>(ParkComparison {
                park_id: park_id.clone(),
                park_name: waits.park_name.clone(),
                source: waits.source.clone(),
                crowd_index: crowd.crowd_index,
                crowd_description: crowd.crowd_description,
                average_wait: waits.summary.average_wait,
                max_wait: waits.summary.max_wait,
                open_attractions: waits.summary.open_attractions,
                is_demo: waits.is_demo,
            })
        }
    }))
    .await;

    let mut comparisons = Vec::new();
    let mut unavailable = Vec::new();
    for (park_id, result) in park_ids.iter().zip(results) {
        match result {
            Ok(comparison) => comparisons.push(comparison),
            Err(e) => {
                warn!("Skipping park {} in comparison: {}", park_id, e);
                unavailable.push(park_id.clone());
            }
        }
    }
    comparisons.sort_by(|a, b| {
        a.crowd_index
            .cmp(&b.crowd_index)
            .then(a.average_wait.total_cmp(&b.average_wait))
    });

    Ok(HttpResponse::Ok().json(json!({
        "date": date,
        "parks": comparisons,
        "unavailable": unavailable,
        "recommendation": comparisons.first().map(|c| c.park_id.clone()),
    })))
}
