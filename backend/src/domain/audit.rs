//! Shared audit block carried by every catalogue entity.
//!
//! Soft deletion is expressed through `deleted_at`/`deleted_by`; a record is
//! either active (`deleted_at` absent) or deleted. Restoring clears both
//! fields again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Creation, modification, and soft-delete bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// User that created the record.
    pub created_by: Uuid,
    /// User that last modified the record.
    pub updated_by: Uuid,
    /// Soft-delete timestamp; absent while the record is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// User that soft-deleted the record, absent while active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<Uuid>,
}

impl AuditInfo {
    /// Fresh audit block for a record created now by `actor`.
    #[must_use]
    pub fn created_now(actor: Uuid) -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            created_by: actor,
            updated_by: actor,
            deleted_at: None,
            deleted_by: None,
        }
    }

    /// Whether the record is soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Stamp a modification by `actor`.
    pub fn touch(&mut self, actor: Uuid) {
        self.updated_at = Utc::now();
        self.updated_by = actor;
    }

    /// Mark the record soft-deleted by `actor`.
    pub fn mark_deleted(&mut self, actor: Uuid) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.deleted_by = Some(actor);
        self.updated_at = now;
        self.updated_by = actor;
    }

    /// Clear a soft delete, restoring the record.
    pub fn clear_deleted(&mut self, actor: Uuid) {
        self.deleted_at = None;
        self.deleted_by = None;
        self.touch(actor);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn delete_and_restore_toggle() {
        let creator = Uuid::new_v4();
        let deleter = Uuid::new_v4();
        let mut audit = AuditInfo::created_now(creator);
        assert!(!audit.is_deleted());

        audit.mark_deleted(deleter);
        assert!(audit.is_deleted());
        assert_eq!(audit.deleted_by, Some(deleter));
        assert_eq!(audit.updated_by, deleter);

        audit.clear_deleted(creator);
        assert!(!audit.is_deleted());
        assert_eq!(audit.deleted_by, None);
    }

    #[test]
    fn touch_moves_updated_at_forward() {
        let actor = Uuid::new_v4();
        let mut audit = AuditInfo::created_now(actor);
        let before = audit.updated_at;
        audit.touch(actor);
        assert!(audit.updated_at >= before);
        assert_eq!(audit.created_at, before.min(audit.created_at));
    }
}
