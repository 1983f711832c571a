//! Destination endpoints.
//!
//! ```text
//! POST   /api/v1/public/destinations
//! GET    /api/v1/public/destinations
//! GET    /api/v1/public/destinations/search?q=
//! GET    /api/v1/public/destinations/{id}
//! GET    /api/v1/public/destinations/slug/{slug}
//! PATCH  /api/v1/public/destinations/{id}
//! DELETE /api/v1/public/destinations/{id}[?hard=true]
//! POST   /api/v1/public/destinations/{id}/restore
//! ```

use actix_web::web;

use crate::domain::catalog::{Destination, DestinationChanges, DestinationDraft};
use crate::inbound::http::endpoints::crud_endpoints;

crud_endpoints! {
    module: destinations,
    entity: Destination,
    draft: DestinationDraft,
    changes: DestinationChanges,
    state: destinations,
    tag: "destinations",
    collection: "/api/v1/public/destinations",
    search: "/api/v1/public/destinations/search",
    by_id: "/api/v1/public/destinations/{id}",
    by_slug: "/api/v1/public/destinations/slug/{slug}",
    restore: "/api/v1/public/destinations/{id}/restore",
}

/// Register destination routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_crud(cfg);
}
