//! Amenity endpoints.
//!
//! ```text
//! POST   /api/v1/public/amenities
//! GET    /api/v1/public/amenities
//! GET    /api/v1/public/amenities/search?q=
//! GET    /api/v1/public/amenities/{id}
//! GET    /api/v1/public/amenities/slug/{slug}
//! PATCH  /api/v1/public/amenities/{id}
//! DELETE /api/v1/public/amenities/{id}[?hard=true]
//! POST   /api/v1/public/amenities/{id}/restore
//! ```

use actix_web::web;

use crate::domain::catalog::{Amenity, AmenityChanges, AmenityDraft};
use crate::inbound::http::endpoints::crud_endpoints;

crud_endpoints! {
    module: amenities,
    entity: Amenity,
    draft: AmenityDraft,
    changes: AmenityChanges,
    state: amenities,
    tag: "amenities",
    collection: "/api/v1/public/amenities",
    search: "/api/v1/public/amenities/search",
    by_id: "/api/v1/public/amenities/{id}",
    by_slug: "/api/v1/public/amenities/slug/{slug}",
    restore: "/api/v1/public/amenities/{id}/restore",
}

/// Register amenity routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_crud(cfg);
}
