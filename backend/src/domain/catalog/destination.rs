//! Destination aggregate: the places accommodations and events attach to.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::actor::EntityKind;
use crate::domain::audit::AuditInfo;
use crate::domain::entity::CrudEntity;
use crate::domain::validation::{Issues, check_country, check_non_empty, check_range, check_slug};

use super::Visibility;

/// A geographic destination.
///
/// Coordinates are stored in micro-degrees (degrees × 1e6) to keep the type
/// integral; latitude spans ±90°, longitude ±180°.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Primary identifier.
    pub id: Uuid,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// ISO-3166 alpha-2 country code.
    pub country_code: String,
    /// Short marketing summary.
    pub summary: String,
    /// Latitude in micro-degrees.
    pub latitude_micro: i64,
    /// Longitude in micro-degrees.
    pub longitude_micro: i64,
    /// Publication state.
    pub visibility: Visibility,
    /// Audit block.
    #[serde(flatten)]
    pub audit: AuditInfo,
}

/// Creation payload for [`Destination`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct DestinationDraft {
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// ISO-3166 alpha-2 country code.
    pub country_code: String,
    /// Short marketing summary.
    pub summary: String,
    /// Latitude in micro-degrees.
    pub latitude_micro: i64,
    /// Longitude in micro-degrees.
    pub longitude_micro: i64,
    /// Publication state.
    pub visibility: Visibility,
}

/// Partial update payload for [`Destination`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct DestinationChanges {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// New summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// New latitude in micro-degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude_micro: Option<i64>,
    /// New longitude in micro-degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude_micro: Option<i64>,
    /// New publication state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

const LAT_LIMIT: i64 = 90_000_000;
const LON_LIMIT: i64 = 180_000_000;

impl CrudEntity for Destination {
    const KIND: EntityKind = EntityKind::Destination;

    type Draft = DestinationDraft;
    type Changes = DestinationChanges;

    fn validate_draft(draft: &Self::Draft) -> Issues {
        let mut issues = Issues::new();
        check_slug(&mut issues, "slug", &draft.slug);
        check_non_empty(&mut issues, "name", &draft.name, 160);
        check_country(&mut issues, "countryCode", &draft.country_code);
        check_non_empty(&mut issues, "summary", &draft.summary, 2_000);
        check_range(&mut issues, "latitudeMicro", draft.latitude_micro, -LAT_LIMIT, LAT_LIMIT);
        check_range(&mut issues, "longitudeMicro", draft.longitude_micro, -LON_LIMIT, LON_LIMIT);
        issues
    }

    fn validate_changes(changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        if let Some(name) = &changes.name {
            check_non_empty(&mut issues, "name", name, 160);
        }
        if let Some(country) = &changes.country_code {
            check_country(&mut issues, "countryCode", country);
        }
        if let Some(summary) = &changes.summary {
            check_non_empty(&mut issues, "summary", summary, 2_000);
        }
        if let Some(latitude) = changes.latitude_micro {
            check_range(&mut issues, "latitudeMicro", latitude, -LAT_LIMIT, LAT_LIMIT);
        }
        if let Some(longitude) = changes.longitude_micro {
            check_range(&mut issues, "longitudeMicro", longitude, -LON_LIMIT, LON_LIMIT);
        }
        issues
    }

    fn from_draft(draft: Self::Draft, id: Uuid, audit: AuditInfo) -> Self {
        Self {
            id,
            slug: draft.slug,
            name: draft.name,
            country_code: draft.country_code,
            summary: draft.summary,
            latitude_micro: draft.latitude_micro,
            longitude_micro: draft.longitude_micro,
            visibility: draft.visibility,
            audit,
        }
    }

    fn apply_changes(&mut self, changes: Self::Changes) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(country) = changes.country_code {
            self.country_code = country;
        }
        if let Some(summary) = changes.summary {
            self.summary = summary;
        }
        if let Some(latitude) = changes.latitude_micro {
            self.latitude_micro = latitude;
        }
        if let Some(longitude) = changes.longitude_micro {
            self.longitude_micro = longitude;
        }
        if let Some(visibility) = changes.visibility {
            self.visibility = visibility;
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
        format!("{} {} {}", self.slug, self.name, self.country_code).to_lowercase()
    }
}
