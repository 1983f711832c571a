//! Accommodation endpoints.
//!
//! ```text
//! POST   /api/v1/public/accommodations
//! GET    /api/v1/public/accommodations
//! GET    /api/v1/public/accommodations/search?q=
//! GET    /api/v1/public/accommodations/{id}
//! GET    /api/v1/public/accommodations/slug/{slug}
//! PATCH  /api/v1/public/accommodations/{id}
//! DELETE /api/v1/public/accommodations/{id}[?hard=true]
//! POST   /api/v1/public/accommodations/{id}/restore
//! GET    /api/v1/public/accommodations/destination/{destination_id}
//! ```

use actix_web::{HttpResponse, get, web};
use uuid::Uuid;

use crate::domain::Actor;
use crate::domain::catalog::{Accommodation, AccommodationChanges, AccommodationDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::endpoints::crud_endpoints;
use crate::inbound::http::paging::PageQuery;
use crate::inbound::http::state::HttpState;

crud_endpoints! {
    module: accommodations,
    entity: Accommodation,
    draft: AccommodationDraft,
    changes: AccommodationChanges,
    state: accommodations,
    tag: "accommodations",
    collection: "/api/v1/public/accommodations",
    search: "/api/v1/public/accommodations/search",
    by_id: "/api/v1/public/accommodations/{id}",
    by_slug: "/api/v1/public/accommodations/slug/{slug}",
    restore: "/api/v1/public/accommodations/{id}/restore",
}

/// Page through active accommodations located in one destination.
#[utoipa::path(
    get,
    path = "/api/v1/public/accommodations/destination/{destination_id}",
    tags = ["accommodations"],
    params(
        ("destination_id" = Uuid, Path, description = "Destination identifier"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of accommodations", body = crate::inbound::http::paging::PageEnvelope),
        (status = 400, description = "Invalid cursor", body = crate::domain::Error),
        (status = 401, description = "Missing or unknown API key", body = crate::domain::Error),
        (status = 403, description = "Actor lacks permission", body = crate::domain::Error)
    ),
    security(("ApiKey" = []))
)]
#[get("/api/v1/public/accommodations/destination/{destination_id}")]
pub async fn accommodations_by_destination(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .accommodation_queries
        .by_destination(&actor, path.into_inner(), query.page_request()?)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Register accommodation routes; the bespoke destination listing goes first
/// so its literal segment is not swallowed by the `{id}` matcher.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(accommodations_by_destination);
    configure_crud(cfg);
}
