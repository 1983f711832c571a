//! Accommodation aggregate: bookable stays attached to a destination.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::actor::EntityKind;
use crate::domain::audit::AuditInfo;
use crate::domain::entity::CrudEntity;
use crate::domain::validation::{
    Issues, check_currency, check_non_empty, check_non_negative, check_range, check_slug,
};

use super::Visibility;

/// Lodging category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AccommodationType {
    /// Full-service hotel.
    Hotel,
    /// Shared dormitory lodging.
    Hostel,
    /// Self-catering apartment.
    Apartment,
    /// Standalone cabin.
    Cabin,
    /// Camping pitch or glamping unit.
    Camping,
    /// Owner-hosted guest house.
    GuestHouse,
}

impl AccommodationType {
    /// Stable identifier used in persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Hostel => "hostel",
            Self::Apartment => "apartment",
            Self::Cabin => "cabin",
            Self::Camping => "camping",
            Self::GuestHouse => "guest-house",
        }
    }

    /// Parse the persisted identifier back into a type.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hotel" => Some(Self::Hotel),
            "hostel" => Some(Self::Hostel),
            "apartment" => Some(Self::Apartment),
            "cabin" => Some(Self::Cabin),
            "camping" => Some(Self::Camping),
            "guest-house" => Some(Self::GuestHouse),
            _ => None,
        }
    }
}

/// A bookable stay.
///
/// ## Invariants
/// - `price_per_night` is non-negative, in minor currency units.
/// - `discounted_price`, when present, is strictly below `price_per_night`.
/// - `max_guests` lies in `1..=64`.
/// - `rating_tenths` lies in `0..=50` (0.0 to 5.0 stars in tenths).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    /// Primary identifier.
    pub id: Uuid,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Lodging category.
    pub kind: AccommodationType,
    /// Destination this stay belongs to.
    pub destination_id: Uuid,
    /// Publication state.
    pub visibility: Visibility,
    /// Nightly base price in minor currency units.
    pub price_per_night: i64,
    /// Discounted nightly price, strictly below the base price when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<i64>,
    /// ISO-4217 currency code.
    pub currency: String,
    /// Guest capacity.
    pub max_guests: i32,
    /// Average rating in tenths of a star.
    pub rating_tenths: i32,
    /// Audit block.
    #[serde(flatten)]
    pub audit: AuditInfo,
}

/// Creation payload for [`Accommodation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AccommodationDraft {
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Lodging category.
    pub kind: AccommodationType,
    /// Destination this stay belongs to.
    pub destination_id: Uuid,
    /// Publication state.
    pub visibility: Visibility,
    /// Nightly base price in minor currency units.
    pub price_per_night: i64,
    /// Optional discounted nightly price.
    #[serde(default)]
    pub discounted_price: Option<i64>,
    /// ISO-4217 currency code.
    pub currency: String,
    /// Guest capacity.
    pub max_guests: i32,
}

/// Partial update payload for [`Accommodation`]. Absent fields keep their
/// current value; `discounted_price` uses a nested option so it can be
/// cleared explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AccommodationChanges {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New lodging category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AccommodationType>,
    /// New publication state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// New nightly base price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<i64>,
    /// New discounted price; an explicit `null` clears the discount.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::domain::serde_ext::double_option"
    )]
    #[schema(value_type = Option<i64>)]
    pub discounted_price: Option<Option<i64>>,
    /// New currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// New guest capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<i32>,
}

fn check_price_consistency(issues: &mut Issues, base: i64, discounted: Option<i64>) {
    if let Some(discounted) = discounted {
        check_non_negative(issues, "discountedPrice", discounted);
        if discounted >= base {
            issues.push(
                "discountedPrice",
                "price_inconsistent",
                "discountedPrice must be strictly below pricePerNight",
                "Lower discountedPrice or remove the discount.",
            );
        }
    }
}

impl CrudEntity for Accommodation {
    const KIND: EntityKind = EntityKind::Accommodation;

    type Draft = AccommodationDraft;
    type Changes = AccommodationChanges;

    fn validate_draft(draft: &Self::Draft) -> Issues {
        let mut issues = Issues::new();
        check_slug(&mut issues, "slug", &draft.slug);
        check_non_empty(&mut issues, "name", &draft.name, 160);
        check_non_empty(&mut issues, "description", &draft.description, 10_000);
        check_non_negative(&mut issues, "pricePerNight", draft.price_per_night);
        check_price_consistency(&mut issues, draft.price_per_night, draft.discounted_price);
        check_currency(&mut issues, "currency", &draft.currency);
        check_range(&mut issues, "maxGuests", i64::from(draft.max_guests), 1, 64);
        issues
    }

    fn validate_changes(changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        if let Some(name) = &changes.name {
            check_non_empty(&mut issues, "name", name, 160);
        }
        if let Some(description) = &changes.description {
            check_non_empty(&mut issues, "description", description, 10_000);
        }
        if let Some(price) = changes.price_per_night {
            check_non_negative(&mut issues, "pricePerNight", price);
        }
        // Discount-vs-base consistency is checked against the stored record
        // in validate_against, which sees the merged pair.
        if let Some(currency) = &changes.currency {
            check_currency(&mut issues, "currency", currency);
        }
        if let Some(max_guests) = changes.max_guests {
            check_range(&mut issues, "maxGuests", i64::from(max_guests), 1, 64);
        }
        issues
    }

    fn validate_against(current: &Self, changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        let base = changes.price_per_night.unwrap_or(current.price_per_night);
        let discounted = changes
            .discounted_price
            .unwrap_or(current.discounted_price);
        check_price_consistency(&mut issues, base, discounted);
        issues
    }

    fn from_draft(draft: Self::Draft, id: Uuid, audit: AuditInfo) -> Self {
        Self {
            id,
            slug: draft.slug,
            name: draft.name,
            description: draft.description,
            kind: draft.kind,
            destination_id: draft.destination_id,
            visibility: draft.visibility,
            price_per_night: draft.price_per_night,
            discounted_price: draft.discounted_price,
            currency: draft.currency,
            max_guests: draft.max_guests,
            rating_tenths: 0,
            audit,
        }
    }

    fn apply_changes(&mut self, changes: Self::Changes) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(visibility) = changes.visibility {
            self.visibility = visibility;
        }
        if let Some(price) = changes.price_per_night {
            self.price_per_night = price;
        }
        if let Some(discounted) = changes.discounted_price {
            self.discounted_price = discounted;
        }
        if let Some(currency) = changes.currency {
            self.currency = currency;
        }
        if let Some(max_guests) = changes.max_guests {
            self.max_guests = max_guests;
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn search_haystack(&self) -> String {
        format!("{} {}", self.slug, self.name).to_lowercase()
    }
}
