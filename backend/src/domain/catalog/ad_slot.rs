//! Ad slot aggregate: bookable advertising placements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::actor::EntityKind;
use crate::domain::audit::AuditInfo;
use crate::domain::entity::CrudEntity;
use crate::domain::validation::{Issues, check_non_negative, check_ordered, check_slug};

/// Where the creative is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AdPlacement {
    /// Hero banner on the landing page.
    HomeTop,
    /// Footer banner on the landing page.
    HomeBottom,
    /// Sidebar next to search results.
    SearchSidebar,
    /// Inline card on detail pages.
    DetailInline,
}

impl AdPlacement {
    /// Stable identifier used in persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HomeTop => "home-top",
            Self::HomeBottom => "home-bottom",
            Self::SearchSidebar => "search-sidebar",
            Self::DetailInline => "detail-inline",
        }
    }

    /// Parse the persisted identifier back into a placement.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "home-top" => Some(Self::HomeTop),
            "home-bottom" => Some(Self::HomeBottom),
            "search-sidebar" => Some(Self::SearchSidebar),
            "detail-inline" => Some(Self::DetailInline),
            _ => None,
        }
    }
}

/// A bookable advertising placement, optionally targeted at one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdSlot {
    /// Primary identifier.
    pub id: Uuid,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Rendering position.
    pub placement: AdPlacement,
    /// Destination targeting, absent for network-wide slots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<Uuid>,
    /// Booking window start.
    pub starts_at: DateTime<Utc>,
    /// Booking window end, strictly after the start.
    pub ends_at: DateTime<Utc>,
    /// Daily price in minor currency units.
    pub price_per_day: i64,
    /// Audit block.
    #[serde(flatten)]
    pub audit: AuditInfo,
}

/// Creation payload for [`AdSlot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AdSlotDraft {
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Rendering position.
    pub placement: AdPlacement,
    /// Destination targeting, absent for network-wide slots.
    #[serde(default)]
    pub destination_id: Option<Uuid>,
    /// Booking window start.
    pub starts_at: DateTime<Utc>,
    /// Booking window end.
    pub ends_at: DateTime<Utc>,
    /// Daily price in minor currency units.
    pub price_per_day: i64,
}

/// Partial update payload for [`AdSlot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AdSlotChanges {
    /// New rendering position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<AdPlacement>,
    /// New destination targeting; an explicit `null` widens the slot to the
    /// whole network.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::domain::serde_ext::double_option"
    )]
    #[schema(value_type = Option<Uuid>)]
    pub destination_id: Option<Option<Uuid>>,
    /// New window start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    /// New window end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    /// New daily price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_day: Option<i64>,
}

impl CrudEntity for AdSlot {
    const KIND: EntityKind = EntityKind::AdSlot;

    type Draft = AdSlotDraft;
    type Changes = AdSlotChanges;

    fn validate_draft(draft: &Self::Draft) -> Issues {
        let mut issues = Issues::new();
        check_slug(&mut issues, "slug", &draft.slug);
        check_ordered(&mut issues, "startsAt", "endsAt", draft.starts_at, draft.ends_at);
        check_non_negative(&mut issues, "pricePerDay", draft.price_per_day);
        issues
    }

    fn validate_changes(changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        if let Some(price) = changes.price_per_day {
            check_non_negative(&mut issues, "pricePerDay", price);
        }
        issues
    }

    fn validate_against(current: &Self, changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        let starts_at = changes.starts_at.unwrap_or(current.starts_at);
        let ends_at = changes.ends_at.unwrap_or(current.ends_at);
        check_ordered(&mut issues, "startsAt", "endsAt", starts_at, ends_at);
        issues
    }

    fn from_draft(draft: Self::Draft, id: Uuid, audit: AuditInfo) -> Self {
        Self {
            id,
            slug: draft.slug,
            placement: draft.placement,
            destination_id: draft.destination_id,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            price_per_day: draft.price_per_day,
            audit,
        }
    }

    fn apply_changes(&mut self, changes: Self::Changes) {
        if let Some(placement) = changes.placement {
            self.placement = placement;
        }
        if let Some(destination_id) = changes.destination_id {
            self.destination_id = destination_id;
        }
        if let Some(starts_at) = changes.starts_at {
            self.starts_at = starts_at;
        }
        if let Some(ends_at) = changes.ends_at {
            self.ends_at = ends_at;
        }
        if let Some(price) = changes.price_per_day {
            self.price_per_day = price;
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
        format!("{} {}", self.slug, self.placement.as_str()).to_lowercase()
    }
}
