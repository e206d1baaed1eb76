use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use serial_test::serial;

mod common;
use common::{paris_request, TestApp};

fn activities(itinerary: &Value) -> Vec<&Value> {
    itinerary["days"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|d| d["activities"].as_array().unwrap())
        .collect()
}

#[actix_rt::test]
#[serial]
async fn test_generate_paris_itinerary() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(paris_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day["day"], i as u64 + 1);
    }

    let scheduled = activities(&body);
    assert!(scheduled
        .iter()
        .all(|a| ["museums", "dining", "custom"].contains(&a["category"].as_str().unwrap())));
    assert!(scheduled.iter().any(|a| a["category"] == "museums"));
    assert_eq!(body["continent"], "Europe");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[actix_rt::test]
#[serial]
async fn test_custom_activities_are_always_scheduled() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(paris_request())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let custom: Vec<_> = activities(&body)
        .into_iter()
        .filter(|a| a["is_custom"] == true)
        .collect();
    assert_eq!(custom.len(), 1);
    assert_eq!(custom[0]["name"], "Cooking class");
    assert_eq!(custom[0]["estimated_duration"], "2 hours 30 minutes");
    assert_eq!(body["custom_activities_count"], 1);
}

#[actix_rt::test]
#[serial]
async fn test_unmatched_interests_give_empty_days() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(json!({
            "destination": "Paris",
            "interests": ["underwater basket weaving"],
            "number_of_days": 3
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert!(days.iter().all(|d| d["activities"].as_array().unwrap().is_empty()));
}

#[actix_rt::test]
#[serial]
async fn test_travel_dates_set_day_count() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(json!({
            "destination": "Tokyo",
            "interests": ["food"],
            "travel_dates": ["2026-04-01", "2026-04-02"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["number_of_days"], 2);
    assert_eq!(body["days"][0]["date"], "2026-04-01");
    assert_eq!(body["days"][1]["date"], "2026-04-02");
}

#[actix_rt::test]
#[serial]
async fn test_invalid_itinerary_requests() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let invalid = [
        // different continents
        json!({ "destination": "Paris & Tokyo", "interests": ["museums"], "number_of_days": 3 }),
        // both day count and dates
        json!({
            "destination": "Paris",
            "interests": ["museums"],
            "number_of_days": 2,
            "travel_dates": ["2026-04-01", "2026-04-02"]
        }),
        // neither day count nor dates
        json!({ "destination": "Paris", "interests": ["museums"] }),
        json!({ "destination": "", "interests": ["museums"], "number_of_days": 2 }),
        json!({ "destination": "Paris", "interests": [], "number_of_days": 2 }),
        json!({ "destination": "Paris", "interests": ["museums"], "travel_dates": ["April 1st"] }),
    ];

    for body in invalid {
        let req = test::TestRequest::post()
            .uri("/api/generate-itinerary")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let error: Value = test::read_body_json(resp).await;
        assert!(error["error"].is_string());
    }
}

#[actix_rt::test]
#[serial]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"destination\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
#[serial]
async fn test_saved_itineraries_and_lookup() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(paris_request())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/itineraries/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["days"], created["days"]);

    let req = test::TestRequest::get()
        .uri("/api/saved-itineraries")
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;
    assert!(saved.as_array().unwrap().iter().any(|s| s["id"] == id.as_str()));

    let req = test::TestRequest::get()
        .uri("/api/itineraries/does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
#[serial]
async fn test_export_itinerary() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(paris_request())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/export-itinerary")
        .set_json(json!({ "itinerary_id": id, "format": "pdf" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["format"], "pdf");
    assert!(body["export_id"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/export-itinerary")
        .set_json(json!({ "itinerary_id": id, "format": "fax" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/export-itinerary")
        .set_json(json!({ "itinerary_id": id, "format": "email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/export-itinerary")
        .set_json(json!({ "itinerary_id": "missing", "format": "pdf" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
#[serial]
async fn test_generate_destination_data() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-destination-data")
        .set_json(json!({ "destination": "Paris", "interests": ["museums"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(!body["activities"].as_array().unwrap().is_empty());
    assert!(body["sources"].as_array().unwrap().iter().any(|s| s == "catalog"));

    let req = test::TestRequest::post()
        .uri("/api/generate-destination-data")
        .set_json(json!({ "destination": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
