//! Ad slot endpoints.
//!
//! ```text
//! POST   /api/v1/public/ad-slots
//! GET    /api/v1/public/ad-slots
//! GET    /api/v1/public/ad-slots/placement/{placement}
//! GET    /api/v1/public/ad-slots/search?q=
//! GET    /api/v1/public/ad-slots/{id}
//! GET    /api/v1/public/ad-slots/slug/{slug}
//! PATCH  /api/v1/public/ad-slots/{id}
//! DELETE /api/v1/public/ad-slots/{id}[?hard=true]
//! POST   /api/v1/public/ad-slots/{id}/restore
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::catalog::{AdPlacement, AdSlot, AdSlotChanges, AdSlotDraft};
use crate::domain::{Actor, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::endpoints::crud_endpoints;
use crate::inbound::http::paging::PageQuery;
use crate::inbound::http::state::HttpState;

crud_endpoints! {
    module: ad_slots,
    entity: AdSlot,
    draft: AdSlotDraft,
    changes: AdSlotChanges,
    state: ad_slots,
    tag: "ad-slots",
    collection: "/api/v1/public/ad-slots",
    search: "/api/v1/public/ad-slots/search",
    by_id: "/api/v1/public/ad-slots/{id}",
    by_slug: "/api/v1/public/ad-slots/slug/{slug}",
    restore: "/api/v1/public/ad-slots/{id}/restore",
}

/// Page through ad slots rendered at one placement.
#[utoipa::path(
    get,
    path = "/api/v1/public/ad-slots/placement/{placement}",
    tags = ["ad-slots"],
    params(
        ("placement" = String, Path, description = "Rendering surface, e.g. `home-banner`"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of ad slots", body = crate::inbound::http::paging::PageEnvelope),
        (status = 400, description = "Unknown placement or invalid cursor", body = crate::domain::Error),
        (status = 401, description = "Missing or unknown API key", body = crate::domain::Error),
        (status = 403, description = "Actor lacks permission", body = crate::domain::Error)
    ),
    security(("ApiKey" = []))
)]
#[get("/api/v1/public/ad-slots/placement/{placement}")]
pub async fn ad_slots_by_placement(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let placement = AdPlacement::parse(&raw)
        .ok_or_else(|| Error::validation(format!("unknown ad placement {raw}")))?;
    let page = state
        .ad_slot_queries
        .by_placement(&actor, placement, query.page_request()?)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Register ad slot routes; the placement listing goes first so its literal
/// segment is not swallowed by the `{id}` matcher.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ad_slots_by_placement);
    configure_crud(cfg);
}
