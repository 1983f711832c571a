//! End-to-end lifecycle coverage over a fixture-backed application:
//! authentication, permission gates, validation, soft deletion, restore,
//! pagination, and the bespoke finder routes.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use backend::Trace;
use backend::inbound::http::health::{HealthState, health, health_db, live, ready};
use backend::inbound::http::state::{
    FIXTURE_ADMIN_KEY, FIXTURE_EDITOR_KEY, FIXTURE_VIEWER_KEY, HttpState,
};
use backend::server::api_routes;

async fn fixture_app() -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let http_state = web::Data::new(HttpState::fixtures().await);
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    test::init_service(
        App::new()
            .app_data(http_state)
            .app_data(health_state)
            .wrap(Trace)
            .configure(api_routes)
            .service(health)
            .service(health_db)
            .service(ready)
            .service(live),
    )
    .await
}

fn bearer(key: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {key}"))
}

fn accommodation_draft(slug: &str) -> Value {
    json!({
        "slug": slug,
        "name": "Quinta do Vale",
        "description": "Converted farmhouse overlooking the valley.",
        "kind": "guest-house",
        "destinationId": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "visibility": "PUBLIC",
        "pricePerNight": 14500,
        "currency": "EUR",
        "maxGuests": 4
    })
}

#[actix_web::test]
async fn accommodation_create_then_get_round_trips() {
    let app = fixture_app().await;

    let created = test::TestRequest::post()
        .uri("/api/v1/public/accommodations")
        .insert_header(bearer(FIXTURE_EDITOR_KEY))
        .set_json(accommodation_draft("quinta-do-vale"))
        .send_request(&app)
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(created.headers().get("trace-id").is_some());
    let body: Value = test::read_body_json(created).await;
    let id = body["id"].as_str().expect("record id").to_owned();
    assert_eq!(body["visibility"], json!("PUBLIC"));
    assert_eq!(body["pricePerNight"], json!(14500));

    let fetched = test::TestRequest::get()
        .uri(&format!("/api/v1/public/accommodations/{id}"))
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .send_request(&app)
        .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(fetched).await;
    assert_eq!(fetched["slug"], json!("quinta-do-vale"));
}

#[actix_web::test]
async fn viewer_mutation_is_forbidden_and_writes_nothing() {
    let app = fixture_app().await;

    let denied = test::TestRequest::post()
        .uri("/api/v1/public/accommodations")
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .set_json(accommodation_draft("no-such-stay"))
        .send_request(&app)
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(denied).await;
    assert_eq!(body["code"], json!("FORBIDDEN"));

    let listed = test::TestRequest::get()
        .uri("/api/v1/public/accommodations")
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .send_request(&app)
        .await;
    let listed: Value = test::read_body_json(listed).await;
    assert_eq!(listed["items"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn invalid_payload_reports_every_field_issue() {
    let app = fixture_app().await;

    let response = test::TestRequest::post()
        .uri("/api/v1/public/accommodations")
        .insert_header(bearer(FIXTURE_EDITOR_KEY))
        .set_json(json!({
            "slug": "Bad Slug!",
            "name": "",
            "description": "ok",
            "kind": "hotel",
            "destinationId": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "visibility": "PUBLIC",
            "pricePerNight": -1,
            "currency": "euro",
            "maxGuests": 0
        }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
    let issues = body["details"]["issues"].as_array().expect("issue list");
    assert!(issues.len() >= 5, "expected issues for every bad field");
}

#[actix_web::test]
async fn soft_delete_hides_and_restore_reinstates() {
    let app = fixture_app().await;

    let created = test::TestRequest::post()
        .uri("/api/v1/public/tags")
        .insert_header(bearer(FIXTURE_EDITOR_KEY))
        .set_json(json!({ "slug": "seaside", "name": "Seaside", "colour": "#2266aa" }))
        .send_request(&app)
        .await;
    let body: Value = test::read_body_json(created).await;
    let id = body["id"].as_str().expect("record id").to_owned();

    let deleted = test::TestRequest::delete()
        .uri(&format!("/api/v1/public/tags/{id}"))
        .insert_header(bearer(FIXTURE_EDITOR_KEY))
        .send_request(&app)
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = test::TestRequest::get()
        .uri(&format!("/api/v1/public/tags/{id}"))
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .send_request(&app)
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let searched = test::TestRequest::get()
        .uri("/api/v1/public/tags/search?q=seaside")
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .send_request(&app)
        .await;
    let searched: Value = test::read_body_json(searched).await;
    assert_eq!(searched["items"].as_array().map(Vec::len), Some(0));

    let restored = test::TestRequest::post()
        .uri(&format!("/api/v1/public/tags/{id}/restore"))
        .insert_header(bearer(FIXTURE_EDITOR_KEY))
        .send_request(&app)
        .await;
    assert_eq!(restored.status(), StatusCode::OK);

    let back = test::TestRequest::get()
        .uri(&format!("/api/v1/public/tags/{id}"))
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .send_request(&app)
        .await;
    assert_eq!(back.status(), StatusCode::OK);
}

#[actix_web::test]
async fn hard_delete_requires_the_admin_role() {
    let app = fixture_app().await;

    let created = test::TestRequest::post()
        .uri("/api/v1/public/tags")
        .insert_header(bearer(FIXTURE_EDITOR_KEY))
        .set_json(json!({ "slug": "ephemeral", "name": "Ephemeral", "colour": "#112233" }))
        .send_request(&app)
        .await;
    let body: Value = test::read_body_json(created).await;
    let id = body["id"].as_str().expect("record id").to_owned();

    let denied = test::TestRequest::delete()
        .uri(&format!("/api/v1/public/tags/{id}?hard=true"))
        .insert_header(bearer(FIXTURE_EDITOR_KEY))
        .send_request(&app)
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let removed = test::TestRequest::delete()
        .uri(&format!("/api/v1/public/tags/{id}?hard=true"))
        .insert_header(bearer(FIXTURE_ADMIN_KEY))
        .send_request(&app)
        .await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    // Permanently removed records cannot be restored.
    let gone = test::TestRequest::post()
        .uri(&format!("/api/v1/public/tags/{id}/restore"))
        .insert_header(bearer(FIXTURE_ADMIN_KEY))
        .send_request(&app)
        .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn listings_paginate_with_opaque_cursors() {
    let app = fixture_app().await;
    for slug in ["alpha", "bravo", "charlie"] {
        let created = test::TestRequest::post()
            .uri("/api/v1/public/tags")
            .insert_header(bearer(FIXTURE_EDITOR_KEY))
            .set_json(json!({ "slug": slug, "name": slug, "colour": "#445566" }))
            .send_request(&app)
            .await;
        assert_eq!(created.status(), StatusCode::CREATED);
    }

    let first = test::TestRequest::get()
        .uri("/api/v1/public/tags?limit=2")
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .send_request(&app)
        .await;
    let first: Value = test::read_body_json(first).await;
    assert_eq!(first["items"].as_array().map(Vec::len), Some(2));
    let cursor = first["nextCursor"].as_str().expect("more pages").to_owned();

    let second = test::TestRequest::get()
        .uri(&format!("/api/v1/public/tags?limit=2&cursor={cursor}"))
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .send_request(&app)
        .await;
    let second: Value = test::read_body_json(second).await;
    assert_eq!(second["items"].as_array().map(Vec::len), Some(1));
    assert!(second["nextCursor"].is_null());

    let garbage = test::TestRequest::get()
        .uri("/api/v1/public/tags?cursor=%21%21")
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .send_request(&app)
        .await;
    assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn upcoming_listing_excludes_finished_events() {
    let app = fixture_app().await;
    let now = Utc::now();
    for (slug, offset_hours) in [("vintage-fair", -48_i64), ("harvest-feast", 48)] {
        let starts = now + Duration::hours(offset_hours);
        let ends = starts + Duration::hours(6);
        let created = test::TestRequest::post()
            .uri("/api/v1/public/events")
            .insert_header(bearer(FIXTURE_EDITOR_KEY))
            .set_json(json!({
                "slug": slug,
                "name": slug,
                "description": "Seasonal festival",
                "destinationId": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                "startsAt": starts,
                "endsAt": ends,
                "capacity": 120
            }))
            .send_request(&app)
            .await;
        assert_eq!(created.status(), StatusCode::CREATED);
    }

    let upcoming = test::TestRequest::get()
        .uri("/api/v1/public/events/upcoming")
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .send_request(&app)
        .await;
    assert_eq!(upcoming.status(), StatusCode::OK);
    let upcoming: Value = test::read_body_json(upcoming).await;
    let items = upcoming["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["slug"], json!("harvest-feast"));
}

#[actix_web::test]
async fn unknown_api_key_is_unauthorised() {
    let app = fixture_app().await;
    let response = test::TestRequest::get()
        .uri("/api/v1/public/destinations")
        .insert_header(bearer("not-a-real-key"))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], json!("UNAUTHORIZED"));
}

#[actix_web::test]
async fn grants_widen_a_viewer_beyond_their_role() {
    // The fixture viewer carries a tag.create grant.
    let app = fixture_app().await;
    let allowed = test::TestRequest::post()
        .uri("/api/v1/public/tags")
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .set_json(json!({ "slug": "granted", "name": "Granted", "colour": "#aabbcc" }))
        .send_request(&app)
        .await;
    assert_eq!(allowed.status(), StatusCode::CREATED);

    let denied = test::TestRequest::post()
        .uri("/api/v1/public/amenities")
        .insert_header(bearer(FIXTURE_VIEWER_KEY))
        .set_json(json!({
            "slug": "pool",
            "name": "Pool",
            "iconKey": "pool",
            "category": "comfort"
        }))
        .send_request(&app)
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn health_probes_respond_without_a_database() {
    let app = fixture_app().await;
    for uri in ["/health", "/health/db", "/health/ready", "/health/live"] {
        let response = test::TestRequest::get().uri(uri).send_request(&app).await;
        assert_eq!(response.status(), StatusCode::OK, "probe {uri} should pass");
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .expect("no-store header"),
            "no-store"
        );
    }
}
