//! Event aggregate: dated happenings at a destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::actor::EntityKind;
use crate::domain::audit::AuditInfo;
use crate::domain::entity::CrudEntity;
use crate::domain::validation::{
    Issues, check_non_empty, check_non_negative, check_ordered, check_slug,
};

/// A dated event at a destination.
///
/// ## Invariants
/// - `starts_at` strictly precedes `ends_at`.
/// - `capacity >= 0`; zero means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Primary identifier.
    pub id: Uuid,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Destination hosting the event.
    pub destination_id: Uuid,
    /// Opening time.
    pub starts_at: DateTime<Utc>,
    /// Closing time, strictly after the opening time.
    pub ends_at: DateTime<Utc>,
    /// Attendee capacity; zero means unlimited.
    pub capacity: i32,
    /// Audit block.
    #[serde(flatten)]
    pub audit: AuditInfo,
}

/// Creation payload for [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct EventDraft {
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Destination hosting the event.
    pub destination_id: Uuid,
    /// Opening time.
    pub starts_at: DateTime<Utc>,
    /// Closing time.
    pub ends_at: DateTime<Utc>,
    /// Attendee capacity; zero means unlimited.
    #[serde(default)]
    pub capacity: i32,
}

/// Partial update payload for [`Event`].
///
/// When only one boundary of the time window changes, the pair is
/// re-validated against the stored record by the repository-facing service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct EventChanges {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New opening time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    /// New closing time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    /// New capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}

impl CrudEntity for Event {
    const KIND: EntityKind = EntityKind::Event;

    type Draft = EventDraft;
    type Changes = EventChanges;

    fn validate_draft(draft: &Self::Draft) -> Issues {
        let mut issues = Issues::new();
        check_slug(&mut issues, "slug", &draft.slug);
        check_non_empty(&mut issues, "name", &draft.name, 160);
        check_non_empty(&mut issues, "description", &draft.description, 10_000);
        check_ordered(&mut issues, "startsAt", "endsAt", draft.starts_at, draft.ends_at);
        check_non_negative(&mut issues, "capacity", i64::from(draft.capacity));
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
        // Window ordering is checked against the stored record in
        // validate_against, which sees the merged pair.
        if let Some(capacity) = changes.capacity {
            check_non_negative(&mut issues, "capacity", i64::from(capacity));
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
            name: draft.name,
            description: draft.description,
            destination_id: draft.destination_id,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            capacity: draft.capacity,
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
        if let Some(starts_at) = changes.starts_at {
            self.starts_at = starts_at;
        }
        if let Some(ends_at) = changes.ends_at {
            self.ends_at = ends_at;
        }
        if let Some(capacity) = changes.capacity {
            self.capacity = capacity;
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

impl Event {
    /// Whether the event has not yet ended at `now`.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.ends_at > now
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Duration;

    fn draft() -> EventDraft {
        let starts_at = Utc::now();
        EventDraft {
            slug: "fado-night".to_owned(),
            name: "Fado night".to_owned(),
            description: "Live fado in Alfama.".to_owned(),
            destination_id: Uuid::new_v4(),
            starts_at,
            ends_at: starts_at + Duration::hours(3),
            capacity: 80,
        }
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut bad = draft();
        bad.ends_at = bad.starts_at - Duration::hours(1);
        let issues = Event::validate_draft(&bad);
        assert!(issues.as_slice().iter().any(|i| i.code == "inverted_range"));
    }

    #[test]
    fn zero_length_window_is_rejected() {
        let mut bad = draft();
        bad.ends_at = bad.starts_at;
        assert!(!Event::validate_draft(&bad).is_empty());
    }

    #[test]
    fn upcoming_is_judged_by_end_time() {
        let entity = Event::from_draft(draft(), Uuid::new_v4(), AuditInfo::created_now(Uuid::new_v4()));
        assert!(entity.is_upcoming(Utc::now()));
        assert!(!entity.is_upcoming(entity.ends_at + Duration::seconds(1)));
    }
}
