//! Discount code endpoints. The code string acts as the record's slug.
//!
//! ```text
//! POST   /api/v1/public/discount-codes
//! GET    /api/v1/public/discount-codes
//! GET    /api/v1/public/discount-codes/active
//! GET    /api/v1/public/discount-codes/search?q=
//! GET    /api/v1/public/discount-codes/{id}
//! GET    /api/v1/public/discount-codes/slug/{slug}
//! PATCH  /api/v1/public/discount-codes/{id}
//! DELETE /api/v1/public/discount-codes/{id}[?hard=true]
//! POST   /api/v1/public/discount-codes/{id}/restore
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::Actor;
use crate::domain::catalog::{DiscountCode, DiscountCodeChanges, DiscountCodeDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::endpoints::crud_endpoints;
use crate::inbound::http::paging::PageQuery;
use crate::inbound::http::state::HttpState;

crud_endpoints! {
    module: discount_codes,
    entity: DiscountCode,
    draft: DiscountCodeDraft,
    changes: DiscountCodeChanges,
    state: discount_codes,
    tag: "discount-codes",
    collection: "/api/v1/public/discount-codes",
    search: "/api/v1/public/discount-codes/search",
    by_id: "/api/v1/public/discount-codes/{id}",
    by_slug: "/api/v1/public/discount-codes/slug/{slug}",
    restore: "/api/v1/public/discount-codes/{id}/restore",
}

/// Page through codes currently inside their validity window.
#[utoipa::path(
    get,
    path = "/api/v1/public/discount-codes/active",
    tags = ["discount-codes"],
    params(PageQuery),
    responses(
        (status = 200, description = "Page of active codes", body = crate::inbound::http::paging::PageEnvelope),
        (status = 400, description = "Invalid cursor", body = crate::domain::Error),
        (status = 401, description = "Missing or unknown API key", body = crate::domain::Error),
        (status = 403, description = "Actor lacks permission", body = crate::domain::Error)
    ),
    security(("ApiKey" = []))
)]
#[get("/api/v1/public/discount-codes/active")]
pub async fn discount_codes_active(
    state: web::Data<HttpState>,
    actor: Actor,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .discount_code_queries
        .active(&actor, query.page_request()?)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Register discount code routes; `active` goes first so the literal
/// segment is not swallowed by the `{id}` matcher.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(discount_codes_active);
    configure_crud(cfg);
}
