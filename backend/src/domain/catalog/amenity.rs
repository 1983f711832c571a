//! Amenity aggregate: features an accommodation can offer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::actor::EntityKind;
use crate::domain::audit::AuditInfo;
use crate::domain::entity::CrudEntity;
use crate::domain::validation::{Issues, check_non_empty, check_slug};

/// Amenity grouping shown as filter sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AmenityCategory {
    /// Essentials such as wifi or heating.
    Basic,
    /// Comfort extras such as a pool or spa.
    Comfort,
    /// Safety equipment.
    Safety,
    /// Outdoor facilities.
    Outdoors,
    /// Paid services such as airport shuttle.
    Services,
}

impl AmenityCategory {
    /// Stable identifier used in persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Comfort => "comfort",
            Self::Safety => "safety",
            Self::Outdoors => "outdoors",
            Self::Services => "services",
        }
    }

    /// Parse the persisted identifier back into a category.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "basic" => Some(Self::Basic),
            "comfort" => Some(Self::Comfort),
            "safety" => Some(Self::Safety),
            "outdoors" => Some(Self::Outdoors),
            "services" => Some(Self::Services),
            _ => None,
        }
    }
}

/// A feature an accommodation can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    /// Primary identifier.
    pub id: Uuid,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Semantic icon key rendered by clients.
    pub icon_key: String,
    /// Filter section this amenity belongs to.
    pub category: AmenityCategory,
    /// Audit block.
    #[serde(flatten)]
    pub audit: AuditInfo,
}

/// Creation payload for [`Amenity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AmenityDraft {
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Semantic icon key rendered by clients.
    pub icon_key: String,
    /// Filter section this amenity belongs to.
    pub category: AmenityCategory,
}

/// Partial update payload for [`Amenity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AmenityChanges {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New icon key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_key: Option<String>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AmenityCategory>,
}

impl CrudEntity for Amenity {
    const KIND: EntityKind = EntityKind::Amenity;

    type Draft = AmenityDraft;
    type Changes = AmenityChanges;

    fn validate_draft(draft: &Self::Draft) -> Issues {
        let mut issues = Issues::new();
        check_slug(&mut issues, "slug", &draft.slug);
        check_non_empty(&mut issues, "name", &draft.name, 120);
        check_slug(&mut issues, "iconKey", &draft.icon_key);
        issues
    }

    fn validate_changes(changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        if let Some(name) = &changes.name {
            check_non_empty(&mut issues, "name", name, 120);
        }
        if let Some(icon_key) = &changes.icon_key {
            check_slug(&mut issues, "iconKey", icon_key);
        }
        issues
    }

    fn from_draft(draft: Self::Draft, id: Uuid, audit: AuditInfo) -> Self {
        Self {
            id,
            slug: draft.slug,
            name: draft.name,
            icon_key: draft.icon_key,
            category: draft.category,
            audit,
        }
    }

    fn apply_changes(&mut self, changes: Self::Changes) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(icon_key) = changes.icon_key {
            self.icon_key = icon_key;
        }
        if let Some(category) = changes.category {
            self.category = category;
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

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn icon_key_follows_slug_rules() {
        let draft = AmenityDraft {
            slug: "heated-pool".to_owned(),
            name: "Heated pool".to_owned(),
            icon_key: "Pool Icon".to_owned(),
            category: AmenityCategory::Comfort,
        };
        let issues = Amenity::validate_draft(&draft);
        assert!(issues.as_slice().iter().any(|i| i.field == "iconKey"));
    }
}
