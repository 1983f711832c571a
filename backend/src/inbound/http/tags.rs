//! Tag endpoints.
//!
//! ```text
//! POST   /api/v1/public/tags
//! GET    /api/v1/public/tags
//! GET    /api/v1/public/tags/search?q=
//! GET    /api/v1/public/tags/{id}
//! GET    /api/v1/public/tags/slug/{slug}
//! PATCH  /api/v1/public/tags/{id}
//! DELETE /api/v1/public/tags/{id}[?hard=true]
//! POST   /api/v1/public/tags/{id}/restore
//! ```

use actix_web::web;

use crate::domain::catalog::{Tag, TagChanges, TagDraft};
use crate::inbound::http::endpoints::crud_endpoints;

crud_endpoints! {
    module: tags,
    entity: Tag,
    draft: TagDraft,
    changes: TagChanges,
    state: tags,
    tag: "tags",
    collection: "/api/v1/public/tags",
    search: "/api/v1/public/tags/search",
    by_id: "/api/v1/public/tags/{id}",
    by_slug: "/api/v1/public/tags/slug/{slug}",
    restore: "/api/v1/public/tags/{id}/restore",
}

/// Register tag routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_crud(cfg);
}

#[cfg(test)]
mod tests {
    //! Handler-level coverage over a fixture-backed app.
    use super::*;
    use crate::inbound::http::state::{
        FIXTURE_EDITOR_KEY, FIXTURE_VIEWER_KEY, HttpState,
    };
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use serde_json::json;

    async fn fixture_app()
    -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        let state = web::Data::new(HttpState::fixtures().await);
        test::init_service(App::new().app_data(state).configure(configure)).await
    }

    fn bearer(key: &str) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {key}"))
    }

    #[actix_web::test]
    async fn create_then_fetch_round_trips() {
        let app = fixture_app().await;
        let created = test::TestRequest::post()
            .uri("/api/v1/public/tags")
            .insert_header(bearer(FIXTURE_EDITOR_KEY))
            .set_json(json!({
                "slug": "family-friendly",
                "name": "Family friendly",
                "colour": "#ff8800"
            }))
            .send_request(&app)
            .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(created).await;
        let id = body["id"].as_str().expect("created tag has an id").to_owned();

        let fetched = test::TestRequest::get()
            .uri(&format!("/api/v1/public/tags/{id}"))
            .insert_header(bearer(FIXTURE_VIEWER_KEY))
            .send_request(&app)
            .await;
        assert_eq!(fetched.status(), StatusCode::OK);
        let fetched: serde_json::Value = test::read_body_json(fetched).await;
        assert_eq!(fetched["slug"], json!("family-friendly"));

        let by_slug = test::TestRequest::get()
            .uri("/api/v1/public/tags/slug/family-friendly")
            .insert_header(bearer(FIXTURE_VIEWER_KEY))
            .send_request(&app)
            .await;
        assert_eq!(by_slug.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn missing_api_key_is_unauthorised() {
        let app = fixture_app().await;
        let response = test::TestRequest::get()
            .uri("/api/v1/public/tags")
            .send_request(&app)
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["code"], json!("UNAUTHORIZED"));
    }

    #[actix_web::test]
    async fn invalid_draft_reports_field_issues() {
        let app = fixture_app().await;
        let response = test::TestRequest::post()
            .uri("/api/v1/public/tags")
            .insert_header(bearer(FIXTURE_EDITOR_KEY))
            .set_json(json!({ "slug": "Bad Slug!", "name": "", "colour": "red" }))
            .send_request(&app)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["code"], json!("VALIDATION_ERROR"));
        let issues = body["details"]["issues"]
            .as_array()
            .expect("validation details list issues");
        assert_eq!(issues.len(), 3);
    }
}
