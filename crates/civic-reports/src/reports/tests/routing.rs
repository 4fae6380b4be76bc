use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::ReportsConfig;
use crate::reports::router::{create_handler, list_handler, ListingParams};
use crate::reports::{report_router, ReportStore};

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

fn response_ids(payload: &Value) -> Vec<String> {
    payload["reports"]
        .as_array()
        .expect("reports array")
        .iter()
        .map(|report| report["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn submit_route_creates_pending_report() {
    let (store, _) = build_store();
    let router = router_with_store(store);

    let response = router
        .oneshot(
            Request::post("/api/v1/reports")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&submission()).expect("serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "Pending");
    assert_eq!(payload["title"], "Test");
    assert!(payload["id"].as_str().is_some());
}

#[tokio::test]
async fn submit_handler_returns_unprocessable_for_blank_title() {
    let (store, _) = build_store();
    let mut invalid = submission();
    invalid.title = String::new();

    let response = create_handler(State(Arc::new(store)), axum::Json(invalid))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("title"));
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let store = Arc::new(ReportStore::new(
        Arc::new(ConflictRepository),
        ReportsConfig::immediate(),
    ));

    let response = create_handler(State(store), axum::Json(submission()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_handler_returns_service_unavailable_when_offline() {
    let store = Arc::new(ReportStore::new(
        Arc::new(UnavailableRepository),
        ReportsConfig::immediate(),
    ));

    let response = list_handler(
        State(store),
        axum::extract::Query(ListingParams::default()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn list_route_filters_by_status_and_sorts() {
    let (store, _) = build_store();
    let router = router_with_store(store);

    let response = router
        .oneshot(get(
            "/api/v1/reports?status=Pending&sort=created_at&direction=asc",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(response_ids(&payload), vec!["1", "3"]);
    assert_eq!(payload["totalItems"], 2);
    assert_eq!(payload["totalPages"], 1);
    assert_eq!(payload["pageSize"], 9);
    assert_eq!(payload["emptyState"], Value::Null);
}

#[tokio::test]
async fn list_route_applies_category_before_search() {
    let (store, _) = build_store();
    let router = router_with_store(store);

    let response = router
        .oneshot(get("/api/v1/reports?category=Garbage&q=STREET"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(response_ids(&payload).is_empty());
    assert_eq!(payload["category"], "Garbage");
    assert_eq!(payload["emptyState"], json!("no_matches"));
    assert!(payload["emptyMessage"].as_str().is_some());
}

#[tokio::test]
async fn list_route_reports_empty_category() {
    let store = ReportStore::in_memory(unseeded_config());
    let router = router_with_store(store);

    let response = router
        .oneshot(get("/api/v1/reports?category=water_leakage"))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(payload["emptyState"], json!("empty_category"));
    assert_eq!(
        payload["emptyMessage"],
        json!("No Water Leakage reports have been submitted yet.")
    );
}

#[tokio::test]
async fn list_route_paginates_with_configured_page_size() {
    let config = ReportsConfig {
        page_size: 3,
        ..ReportsConfig::immediate()
    };
    let router = router_with_store(ReportStore::in_memory(config));

    let response = router
        .clone()
        .oneshot(get("/api/v1/reports?page=2"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(response_ids(&payload), vec!["1"]);
    assert_eq!(payload["totalPages"], 2);

    let response = router
        .oneshot(get("/api/v1/reports?page=7"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(response_ids(&payload).is_empty());
    assert_eq!(payload["page"], 7);
}

#[tokio::test]
async fn list_route_rejects_unknown_status() {
    let (store, _) = build_store();
    let router = router_with_store(store);

    let response = router
        .oneshot(get("/api/v1/reports?status=Closed"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn category_route_accepts_display_labels() {
    let (store, _) = build_store();
    let router = router_with_store(store);

    let response = router
        .clone()
        .oneshot(get("/api/v1/reports/category/Water%20Leakage"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let reports = payload.as_array().expect("array of reports");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["category"], "Water Leakage");

    let response = router
        .clone()
        .oneshot(get("/api/v1/reports/category/All"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(4));

    let response = router
        .oneshot(get("/api/v1/reports/category/Graffiti"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_route_returns_details_or_not_found() {
    let (store, _) = build_store();
    let router = router_with_store(store);

    let response = router
        .clone()
        .oneshot(get("/api/v1/reports/2"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "In Progress");
    assert_eq!(payload["latitude"], 40.7138);

    let response = router
        .oneshot(get("/api/v1/reports/does-not-exist"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"].as_str().is_some());
}

#[tokio::test]
async fn every_read_route_reports_an_offline_store_as_unavailable() {
    let store = Arc::new(ReportStore::new(
        Arc::new(UnavailableRepository),
        ReportsConfig::immediate(),
    ));
    let router = report_router(store);

    for uri in [
        "/api/v1/reports",
        "/api/v1/reports/stats",
        "/api/v1/reports/category/Pothole",
        "/api/v1/reports/1",
    ] {
        let response = router
            .clone()
            .oneshot(get(uri))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");
    }
}

#[tokio::test]
async fn stats_route_counts_statuses() {
    let (store, _) = build_store();
    let router = router_with_store(store);

    let response = router
        .oneshot(get("/api/v1/reports/stats"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], 4);
    assert_eq!(payload["pending"], 2);
    assert_eq!(payload["inProgress"], 1);
    assert_eq!(payload["byCategory"]["Pothole"], 1);
}
