//! Platform user records backing the actor model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::actor::{Actor, Permission, Role};

/// A platform user able to authenticate against the API.
///
/// The bearer API key itself is never stored; only its SHA-256 fingerprint
/// (lowercase hex) is persisted and used for lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary identifier.
    pub id: Uuid,
    /// Contact address, unique per user.
    pub email: String,
    /// Name shown in dashboards and logs.
    pub display_name: String,
    /// Assigned role.
    pub role: Role,
    /// Extra permission grants beyond the role.
    pub grants: Vec<Permission>,
    /// SHA-256 hex fingerprint of the user's API key.
    #[serde(skip_serializing)]
    pub key_fingerprint: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Derive the request actor for this user.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.display_name.clone(), self.role)
            .with_grants(self.grants.clone())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Action, EntityKind};

    fn user(role: Role, grants: Vec<Permission>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_owned(),
            display_name: "Ana".to_owned(),
            role,
            grants,
            key_fingerprint: "00".repeat(32),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn actor_carries_role_and_grants() {
        let grant = Permission::new(EntityKind::Tag, Action::Create);
        let actor = user(Role::Viewer, vec![grant]).actor();
        assert_eq!(actor.role, Role::Viewer);
        assert!(actor.can(grant));
    }

    #[test]
    fn fingerprint_is_not_serialised() {
        let value = serde_json::to_value(user(Role::Admin, Vec::new())).expect("serialise");
        assert!(value.get("keyFingerprint").is_none());
    }
}
