//! Event endpoints.
//!
//! ```text
//! POST   /api/v1/public/events
//! GET    /api/v1/public/events
//! GET    /api/v1/public/events/upcoming
//! GET    /api/v1/public/events/search?q=
//! GET    /api/v1/public/events/{id}
//! GET    /api/v1/public/events/slug/{slug}
//! PATCH  /api/v1/public/events/{id}
//! DELETE /api/v1/public/events/{id}[?hard=true]
//! POST   /api/v1/public/events/{id}/restore
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::Actor;
use crate::domain::catalog::{Event, EventChanges, EventDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::endpoints::crud_endpoints;
use crate::inbound::http::paging::PageQuery;
use crate::inbound::http::state::HttpState;

crud_endpoints! {
    module: events,
    entity: Event,
    draft: EventDraft,
    changes: EventChanges,
    state: events,
    tag: "events",
    collection: "/api/v1/public/events",
    search: "/api/v1/public/events/search",
    by_id: "/api/v1/public/events/{id}",
    by_slug: "/api/v1/public/events/slug/{slug}",
    restore: "/api/v1/public/events/{id}/restore",
}

/// Page through events that have not yet ended.
#[utoipa::path(
    get,
    path = "/api/v1/public/events/upcoming",
    tags = ["events"],
    params(PageQuery),
    responses(
        (status = 200, description = "Page of upcoming events", body = crate::inbound::http::paging::PageEnvelope),
        (status = 400, description = "Invalid cursor", body = crate::domain::Error),
        (status = 401, description = "Missing or unknown API key", body = crate::domain::Error),
        (status = 403, description = "Actor lacks permission", body = crate::domain::Error)
    ),
    security(("ApiKey" = []))
)]
#[get("/api/v1/public/events/upcoming")]
pub async fn events_upcoming(
    state: web::Data<HttpState>,
    actor: Actor,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .event_queries
        .upcoming(&actor, query.page_request()?)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Register event routes; `upcoming` goes first so the literal segment is
/// not swallowed by the `{id}` matcher.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(events_upcoming);
    configure_crud(cfg);
}
