//! Catalogue aggregates: the tourism entities managed by the platform.
//!
//! Every aggregate follows the same shape: the entity struct with an audit
//! block, a `Draft` creation payload, and a `Changes` partial-update payload.
//! Payload validation lives with the entity and reports per-field issues.

pub mod accommodation;
pub mod ad_slot;
pub mod amenity;
pub mod destination;
pub mod discount_code;
pub mod event;
pub mod payment_method;
pub mod tag;

pub use accommodation::{Accommodation, AccommodationChanges, AccommodationDraft, AccommodationType};
pub use ad_slot::{AdPlacement, AdSlot, AdSlotChanges, AdSlotDraft};
pub use amenity::{Amenity, AmenityCategory, AmenityChanges, AmenityDraft};
pub use destination::{Destination, DestinationChanges, DestinationDraft};
pub use discount_code::{DiscountCode, DiscountCodeChanges, DiscountCodeDraft, DiscountValue};
pub use event::{Event, EventChanges, EventDraft};
pub use payment_method::{PaymentKind, PaymentMethod, PaymentMethodChanges, PaymentMethodDraft};
pub use tag::{Tag, TagChanges, TagDraft};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Publication state of a catalogue record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    /// Visible to everyone.
    Public,
    /// Visible to the owning organisation only.
    Private,
    /// Work in progress, hidden from listings.
    Draft,
}

impl Visibility {
    /// Stable identifier used in persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Draft => "DRAFT",
        }
    }

    /// Parse the persisted identifier back into a visibility.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PUBLIC" => Some(Self::Public),
            "PRIVATE" => Some(Self::Private),
            "DRAFT" => Some(Self::Draft),
            _ => None,
        }
    }
}
