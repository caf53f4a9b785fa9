//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use domain::{Email, GuestProfile, LoyaltyTier, Phone, PolicyConfig};
use integration::InMemoryPublisher;
use metrics_exporter_prometheus::PrometheusHandle;
use reservation_store::InMemoryReservationStore;
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

const GUEST: &str = "guest-api";
const VIP: &str = "guest-api-vip";

struct TestApp {
    app: Router,
    state: Arc<api::AppState<InMemoryReservationStore>>,
    publisher: InMemoryPublisher,
}

fn setup() -> TestApp {
    let publisher = InMemoryPublisher::new();
    let state = api::create_state(
        InMemoryReservationStore::new(),
        PolicyConfig::default(),
        Arc::new(publisher.clone()),
    );
    state.guests.register(GuestProfile::new(
        GUEST,
        "Lucas Rocha",
        Email::new("lucas@example.com").unwrap(),
        Phone::new("+5531988776655").unwrap(),
        "101.202.303-40",
        LoyaltyTier::Bronze,
    ));
    state.guests.register(GuestProfile::new(
        VIP,
        "Helena Dias",
        Email::new("helena@example.com").unwrap(),
        Phone::new("+5531911223344").unwrap(),
        "505.606.707-80",
        LoyaltyTier::Gold,
    ));

    TestApp {
        app: api::create_app(state.clone(), get_metrics_handle()),
        state,
        publisher,
    }
}

fn day(offset: i64) -> String {
    (Utc::now().date_naive() + Duration::days(offset))
        .format("%Y-%m-%d")
        .to_string()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn book(app: &Router, guest: &str, from: i64, to: i64, room_type: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/reservations",
        Some(json!({
            "guest_profile_id": guest,
            "check_in": day(from),
            "check_out": day(to),
            "room_type": room_type,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body {json}");
    json["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let t = setup();
    let (status, json) = send(&t.app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_reservation_returns_read_model() {
    let t = setup();
    let (status, json) = send(
        &t.app,
        "POST",
        "/reservations",
        Some(json!({
            "guest_profile_id": GUEST,
            "check_in": day(1),
            "check_out": day(4),
            "room_type": "double",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "pending");
    assert_eq!(json["room_type"], "DOUBLE");
    assert_eq!(json["period"]["nights"], 3);
    assert_eq!(json["guest"]["guest_profile_id"], GUEST);
    assert_eq!(json["guest"]["email"], "lucas@example.com");
    assert_eq!(json["guest"]["is_vip"], false);
}

#[tokio::test]
async fn test_create_rejected_by_policy() {
    let t = setup();
    let (status, json) = send(
        &t.app,
        "POST",
        "/reservations",
        Some(json!({
            "guest_profile_id": GUEST,
            "check_in": day(61),
            "check_out": day(63),
            "room_type": "SINGLE",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("ahead"));

    // The same stay is fine for a VIP.
    book(&t.app, VIP, 61, 63, "SINGLE").await;
}

#[tokio::test]
async fn test_create_when_sold_out() {
    let t = setup();
    t.state.inventory.set_available("SUITE", 0);

    let (status, json) = send(
        &t.app,
        "POST",
        "/reservations",
        Some(json!({
            "guest_profile_id": VIP,
            "check_in": day(1),
            "check_out": day(2),
            "room_type": "SUITE",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("no rooms available"));
}

#[tokio::test]
async fn test_create_for_unknown_guest() {
    let t = setup();
    let (status, _) = send(
        &t.app,
        "POST",
        "/reservations",
        Some(json!({
            "guest_profile_id": "nobody",
            "check_in": day(1),
            "check_out": day(2),
            "room_type": "SINGLE",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_lifecycle_over_http() {
    let t = setup();
    let id = book(&t.app, GUEST, 1, 4, "DOUBLE").await;

    let (status, json) = send(&t.app, "POST", &format!("/reservations/{id}/confirm"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Reservation confirmed.");

    let (status, _) = send(
        &t.app,
        "POST",
        &format!("/reservations/{id}/check-in"),
        Some(json!({ "room_number": "201" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&t.app, "POST", &format!("/reservations/{id}/check-out"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&t.app, "GET", &format!("/reservations/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "checked_out");
    assert_eq!(json["assigned_room_number"], "201");
    assert!(json["timestamps"]["checked_out_at"].is_string());

    assert_eq!(
        t.publisher.published_types().await,
        vec!["ReservationConfirmed", "GuestCheckedIn", "GuestCheckedOut"]
    );
}

#[tokio::test]
async fn test_invalid_transition_is_conflict() {
    let t = setup();
    let id = book(&t.app, GUEST, 1, 3, "SUITE").await;

    let (status, _) = send(
        &t.app,
        "POST",
        &format!("/reservations/{id}/cancel"),
        Some(json!({ "reason": "Plans changed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&t.app, "POST", &format!("/reservations/{id}/confirm"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("cancelled"));
}

#[tokio::test]
async fn test_special_requests_over_http() {
    let t = setup();
    let id = book(&t.app, GUEST, 2, 5, "DOUBLE").await;

    let (status, json) = send(
        &t.app,
        "POST",
        &format!("/reservations/{id}/special-requests"),
        Some(json!({ "type": "late_check_out", "description": "Flight at 6pm" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let request_id = json["request_id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &t.app,
        "POST",
        &format!("/reservations/{id}/special-requests/{request_id}/fulfill"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&t.app, "GET", &format!("/reservations/{id}"), None).await;
    assert_eq!(json["special_requests"][0]["type"], "late_check_out");
    assert_eq!(json["special_requests"][0]["status"], "fulfilled");

    let (status, _) = send(
        &t.app,
        "DELETE",
        &format!("/reservations/{id}/special-requests/{request_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&t.app, "GET", &format!("/reservations/{id}"), None).await;
    assert_eq!(json["special_requests"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_unknown_request_type_is_bad_request() {
    let t = setup();
    let id = book(&t.app, GUEST, 2, 5, "DOUBLE").await;

    let (status, _) = send(
        &t.app,
        "POST",
        &format!("/reservations/{id}/special-requests"),
        Some(json!({ "type": "spa_day", "description": "Massage" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_with_bad_and_unknown_ids() {
    let t = setup();

    let (status, _) = send(&t.app, "GET", "/reservations/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &t.app,
        "GET",
        &format!("/reservations/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let t = setup();
    book(&t.app, GUEST, 1, 2, "SINGLE").await;
    book(&t.app, GUEST, 3, 4, "DOUBLE").await;
    let suite = book(&t.app, VIP, 5, 6, "SUITE").await;
    send(&t.app, "POST", &format!("/reservations/{suite}/confirm"), None).await;

    let (status, json) = send(&t.app, "GET", "/reservations?per_page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);
    assert_eq!(json["last_page"], 2);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);

    let (_, json) = send(&t.app, "GET", "/reservations?status=confirmed", None).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["id"], suite.as_str());
    assert_eq!(json["items"][0]["guest"]["is_vip"], true);

    let (_, json) = send(&t.app, "GET", "/reservations?room_type=double", None).await;
    assert_eq!(json["total"], 1);

    let (status, _) = send(&t.app, "GET", "/reservations?status=archived", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_page_far_past_the_end_is_empty() {
    let t = setup();
    book(&t.app, GUEST, 1, 2, "SINGLE").await;

    let (status, json) = send(
        &t.app,
        "GET",
        &format!("/reservations?page={}", usize::MAX),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_room_type_lookup() {
    let t = setup();

    let (status, json) = send(&t.app, "GET", "/room-types/suite", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["room_type"], "SUITE");
    assert!(json["capacity"].as_u64().unwrap() > 0);

    let (status, _) = send(&t.app, "GET", "/room-types/PENTHOUSE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let t = setup();
    book(&t.app, GUEST, 1, 2, "SINGLE").await;

    let response = t
        .app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
