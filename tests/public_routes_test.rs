use actix_web::{http::StatusCode, test};
use serde_json::Value;
use serial_test::serial;

mod common;
use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_health_check() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "OK");
}

#[actix_rt::test]
#[serial]
async fn test_detailed_health_reports_each_service() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["services"]["itinerary_store"]["status"], "ok");
    // no api key and no blog scraping
    assert_eq!(body["services"]["waittimes-app"]["status"], "degraded");
    assert_eq!(body["services"]["blog_scraping"]["status"], "degraded");
    assert_eq!(body["status"], "degraded");
}

#[actix_rt::test]
#[serial]
async fn test_all_destinations_with_empty_filters() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/destinations?region=&solo_female_safe=&hidden_gems=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 14);
    assert!(body["destinations"]["paris"].is_object());
    assert!(body["regions"].as_array().unwrap().iter().any(|r| r == "Europe"));
}

#[actix_rt::test]
#[serial]
async fn test_destinations_filters() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/destinations?solo_female_safe=true")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let destinations = body["destinations"].as_object().unwrap();
    assert!(destinations
        .values()
        .all(|d| d["safety_rating"].as_u64().unwrap() >= 4));
    assert!(!destinations.contains_key("mexico_city"));
    assert!(!destinations.contains_key("buenos_aires"));

    let req = test::TestRequest::get()
        .uri("/api/destinations?region=Europe")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 6);
    assert!(body["destinations"]
        .as_object()
        .unwrap()
        .values()
        .all(|d| d["continent"] == "Europe"));

    let req = test::TestRequest::get()
        .uri("/api/destinations?hidden_gems=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 6);
    assert!(body["destinations"]
        .as_object()
        .unwrap()
        .values()
        .all(|d| d["hidden_gem"] == true));
}

#[actix_rt::test]
#[serial]
async fn test_interests_include_guidelines() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/interests").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let interests = body["interests"].as_array().unwrap();
    assert_eq!(interests.len(), 13);
    assert!(interests.iter().any(|i| i == "museums"));
    assert!(!body["solo_female_guidelines"]["general_tips"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[actix_rt::test]
#[serial]
async fn test_cities_and_regions() {
    let app = TestApp::new();
    let app = test::init_service(app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/cities-and-regions")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["regions"]["Europe"].is_array());
    assert!(body["cities"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["destination"] == "paris" || c["city"] == "Montmartre"));
}
