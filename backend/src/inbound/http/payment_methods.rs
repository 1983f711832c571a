//! Payment method endpoints.
//!
//! ```text
//! POST   /api/v1/public/payment-methods
//! GET    /api/v1/public/payment-methods
//! GET    /api/v1/public/payment-methods/kind/{kind}
//! GET    /api/v1/public/payment-methods/search?q=
//! GET    /api/v1/public/payment-methods/{id}
//! GET    /api/v1/public/payment-methods/slug/{slug}
//! PATCH  /api/v1/public/payment-methods/{id}
//! DELETE /api/v1/public/payment-methods/{id}[?hard=true]
//! POST   /api/v1/public/payment-methods/{id}/restore
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::catalog::{
    PaymentKind, PaymentMethod, PaymentMethodChanges, PaymentMethodDraft,
};
use crate::domain::{Actor, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::endpoints::crud_endpoints;
use crate::inbound::http::paging::PageQuery;
use crate::inbound::http::state::HttpState;

crud_endpoints! {
    module: payment_methods,
    entity: PaymentMethod,
    draft: PaymentMethodDraft,
    changes: PaymentMethodChanges,
    state: payment_methods,
    tag: "payment-methods",
    collection: "/api/v1/public/payment-methods",
    search: "/api/v1/public/payment-methods/search",
    by_id: "/api/v1/public/payment-methods/{id}",
    by_slug: "/api/v1/public/payment-methods/slug/{slug}",
    restore: "/api/v1/public/payment-methods/{id}/restore",
}

/// Page through payment methods of one settlement channel.
#[utoipa::path(
    get,
    path = "/api/v1/public/payment-methods/kind/{kind}",
    tags = ["payment-methods"],
    params(
        ("kind" = String, Path, description = "Settlement channel, e.g. `card`"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of payment methods", body = crate::inbound::http::paging::PageEnvelope),
        (status = 400, description = "Unknown kind or invalid cursor", body = crate::domain::Error),
        (status = 401, description = "Missing or unknown API key", body = crate::domain::Error),
        (status = 403, description = "Actor lacks permission", body = crate::domain::Error)
    ),
    security(("ApiKey" = []))
)]
#[get("/api/v1/public/payment-methods/kind/{kind}")]
pub async fn payment_methods_by_kind(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let kind = PaymentKind::parse(&raw)
        .ok_or_else(|| Error::validation(format!("unknown payment kind {raw}")))?;
    let page = state
        .payment_method_queries
        .by_kind(&actor, kind, query.page_request()?)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Register payment method routes; the kind listing goes first so its
/// literal segment is not swallowed by the `{id}` matcher.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(payment_methods_by_kind);
    configure_crud(cfg);
}
