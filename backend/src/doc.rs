//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the catalogue REST API: every CRUD handler, the bespoke finder routes,
//! the health probes, and the bearer API-key security scheme. The generated
//! document is served by Swagger UI in debug builds at `/docs` and exported
//! as JSON at `/api-docs/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::catalog::{
    Accommodation, AccommodationChanges, AccommodationDraft, AccommodationType, AdPlacement,
    AdSlot, AdSlotChanges, AdSlotDraft, Amenity, AmenityCategory, AmenityChanges, AmenityDraft,
    Destination, DestinationChanges, DestinationDraft, DiscountCode, DiscountCodeChanges,
    DiscountCodeDraft, DiscountValue, Event, EventChanges, EventDraft, PaymentKind, PaymentMethod,
    PaymentMethodChanges, PaymentMethodDraft, Tag, TagChanges, TagDraft, Visibility,
};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::paging::PageEnvelope;

/// Enrich the generated document with the bearer API-key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ApiKey",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "API key presented as `Authorization: Bearer <key>`.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the catalogue REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Terraviva backend API",
        description = "Permission-gated CRUD over the tourism catalogue, with \
                       cursor pagination, soft deletion, and health probes.",
        license(name = "ISC")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKey" = [])),
    paths(
        crate::inbound::http::accommodations::accommodations_create,
        crate::inbound::http::accommodations::accommodations_list,
        crate::inbound::http::accommodations::accommodations_search,
        crate::inbound::http::accommodations::accommodations_get,
        crate::inbound::http::accommodations::accommodations_get_by_slug,
        crate::inbound::http::accommodations::accommodations_update,
        crate::inbound::http::accommodations::accommodations_delete,
        crate::inbound::http::accommodations::accommodations_restore,
        crate::inbound::http::accommodations::accommodations_by_destination,
        crate::inbound::http::destinations::destinations_create,
        crate::inbound::http::destinations::destinations_list,
        crate::inbound::http::destinations::destinations_search,
        crate::inbound::http::destinations::destinations_get,
        crate::inbound::http::destinations::destinations_get_by_slug,
        crate::inbound::http::destinations::destinations_update,
        crate::inbound::http::destinations::destinations_delete,
        crate::inbound::http::destinations::destinations_restore,
        crate::inbound::http::amenities::amenities_create,
        crate::inbound::http::amenities::amenities_list,
        crate::inbound::http::amenities::amenities_search,
        crate::inbound::http::amenities::amenities_get,
        crate::inbound::http::amenities::amenities_get_by_slug,
        crate::inbound::http::amenities::amenities_update,
        crate::inbound::http::amenities::amenities_delete,
        crate::inbound::http::amenities::amenities_restore,
        crate::inbound::http::tags::tags_create,
        crate::inbound::http::tags::tags_list,
        crate::inbound::http::tags::tags_search,
        crate::inbound::http::tags::tags_get,
        crate::inbound::http::tags::tags_get_by_slug,
        crate::inbound::http::tags::tags_update,
        crate::inbound::http::tags::tags_delete,
        crate::inbound::http::tags::tags_restore,
        crate::inbound::http::events::events_create,
        crate::inbound::http::events::events_list,
        crate::inbound::http::events::events_search,
        crate::inbound::http::events::events_get,
        crate::inbound::http::events::events_get_by_slug,
        crate::inbound::http::events::events_update,
        crate::inbound::http::events::events_delete,
        crate::inbound::http::events::events_restore,
        crate::inbound::http::events::events_upcoming,
        crate::inbound::http::discount_codes::discount_codes_create,
        crate::inbound::http::discount_codes::discount_codes_list,
        crate::inbound::http::discount_codes::discount_codes_search,
        crate::inbound::http::discount_codes::discount_codes_get,
        crate::inbound::http::discount_codes::discount_codes_get_by_slug,
        crate::inbound::http::discount_codes::discount_codes_update,
        crate::inbound::http::discount_codes::discount_codes_delete,
        crate::inbound::http::discount_codes::discount_codes_restore,
        crate::inbound::http::discount_codes::discount_codes_active,
        crate::inbound::http::payment_methods::payment_methods_create,
        crate::inbound::http::payment_methods::payment_methods_list,
        crate::inbound::http::payment_methods::payment_methods_search,
        crate::inbound::http::payment_methods::payment_methods_get,
        crate::inbound::http::payment_methods::payment_methods_get_by_slug,
        crate::inbound::http::payment_methods::payment_methods_update,
        crate::inbound::http::payment_methods::payment_methods_delete,
        crate::inbound::http::payment_methods::payment_methods_restore,
        crate::inbound::http::payment_methods::payment_methods_by_kind,
        crate::inbound::http::ad_slots::ad_slots_create,
        crate::inbound::http::ad_slots::ad_slots_list,
        crate::inbound::http::ad_slots::ad_slots_search,
        crate::inbound::http::ad_slots::ad_slots_get,
        crate::inbound::http::ad_slots::ad_slots_get_by_slug,
        crate::inbound::http::ad_slots::ad_slots_update,
        crate::inbound::http::ad_slots::ad_slots_delete,
        crate::inbound::http::ad_slots::ad_slots_restore,
        crate::inbound::http::ad_slots::ad_slots_by_placement,
        crate::inbound::http::health::health,
        crate::inbound::http::health::health_db,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PageEnvelope,
        Visibility,
        Accommodation,
        AccommodationDraft,
        AccommodationChanges,
        AccommodationType,
        Destination,
        DestinationDraft,
        DestinationChanges,
        Amenity,
        AmenityDraft,
        AmenityChanges,
        AmenityCategory,
        Tag,
        TagDraft,
        TagChanges,
        Event,
        EventDraft,
        EventChanges,
        DiscountCode,
        DiscountCodeDraft,
        DiscountCodeChanges,
        DiscountValue,
        PaymentMethod,
        PaymentMethodDraft,
        PaymentMethodChanges,
        PaymentKind,
        AdSlot,
        AdSlotDraft,
        AdSlotChanges,
        AdPlacement,
    )),
    tags(
        (name = "accommodations", description = "Bookable stays"),
        (name = "destinations", description = "Geographic destinations"),
        (name = "amenities", description = "Accommodation amenities"),
        (name = "tags", description = "Free-form content tags"),
        (name = "events", description = "Destination events"),
        (name = "discount-codes", description = "Promotional discount codes"),
        (name = "payment-methods", description = "Supported payment methods"),
        (name = "ad-slots", description = "Advertising slots"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying document structure.
    use super::*;

    #[test]
    fn document_lists_every_entity_collection() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/public/accommodations",
            "/api/v1/public/destinations",
            "/api/v1/public/amenities",
            "/api/v1/public/tags",
            "/api/v1/public/events",
            "/api/v1/public/discount-codes",
            "/api/v1/public/payment-methods",
            "/api/v1/public/ad-slots",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should describe {path}"
            );
        }
    }

    #[test]
    fn bespoke_finder_routes_are_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/public/accommodations/destination/{destination_id}",
            "/api/v1/public/events/upcoming",
            "/api/v1/public/discount-codes/active",
            "/api/v1/public/payment-methods/kind/{kind}",
            "/api/v1/public/ad-slots/placement/{placement}",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should describe {path}"
            );
        }
    }

    #[test]
    fn api_key_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("ApiKey"));
    }
}
