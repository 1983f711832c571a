//! Tag aggregate: free-form labels attached to catalogue content.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::actor::EntityKind;
use crate::domain::audit::AuditInfo;
use crate::domain::entity::CrudEntity;
use crate::domain::validation::{Issues, check_hex_colour, check_non_empty, check_slug};

/// A content label with a display colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Primary identifier.
    pub id: Uuid,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Lowercase `#rrggbb` display colour.
    pub colour: String,
    /// Audit block.
    #[serde(flatten)]
    pub audit: AuditInfo,
}

/// Creation payload for [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct TagDraft {
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Lowercase `#rrggbb` display colour.
    pub colour: String,
}

/// Partial update payload for [`Tag`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct TagChanges {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New display colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
}

impl CrudEntity for Tag {
    const KIND: EntityKind = EntityKind::Tag;

    type Draft = TagDraft;
    type Changes = TagChanges;

    fn validate_draft(draft: &Self::Draft) -> Issues {
        let mut issues = Issues::new();
        check_slug(&mut issues, "slug", &draft.slug);
        check_non_empty(&mut issues, "name", &draft.name, 80);
        check_hex_colour(&mut issues, "colour", &draft.colour);
        issues
    }

    fn validate_changes(changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        if let Some(name) = &changes.name {
            check_non_empty(&mut issues, "name", name, 80);
        }
        if let Some(colour) = &changes.colour {
            check_hex_colour(&mut issues, "colour", colour);
        }
        issues
    }

    fn from_draft(draft: Self::Draft, id: Uuid, audit: AuditInfo) -> Self {
        Self {
            id,
            slug: draft.slug,
            name: draft.name,
            colour: draft.colour,
            audit,
        }
    }

    fn apply_changes(&mut self, changes: Self::Changes) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(colour) = changes.colour {
            self.colour = colour;
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
