//! Actor model: who is performing an operation and what they may do.
//!
//! Permissions are `entity.action` pairs. Roles imply permission sets;
//! per-user grants extend the role's set. Hard deletion is additionally
//! restricted to administrators regardless of grants.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Catalogue entity families subject to permission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// Bookable stays.
    Accommodation,
    /// Geographic destinations.
    Destination,
    /// Accommodation amenities.
    Amenity,
    /// Free-form content tags.
    Tag,
    /// Destination events.
    Event,
    /// Promotional discount codes.
    DiscountCode,
    /// Supported payment methods.
    PaymentMethod,
    /// Advertising slots.
    AdSlot,
}

impl EntityKind {
    /// Stable lowercase identifier used in permission names and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accommodation => "accommodation",
            Self::Destination => "destination",
            Self::Amenity => "amenity",
            Self::Tag => "tag",
            Self::Event => "event",
            Self::DiscountCode => "discount-code",
            Self::PaymentMethod => "payment-method",
            Self::AdSlot => "ad-slot",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions an actor can perform on a catalogue entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Read single records and listings.
    View,
    /// Create new records.
    Create,
    /// Modify existing records.
    Update,
    /// Soft- or hard-delete records.
    Delete,
    /// Bring soft-deleted records back.
    Restore,
}

impl Action {
    /// Stable lowercase identifier used in permission names and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Restore => "restore",
        }
    }
}

/// A single `entity.action` permission.
///
/// # Examples
/// ```
/// use backend::domain::{Action, EntityKind, Permission};
///
/// let p = Permission::new(EntityKind::Accommodation, Action::Create);
/// assert_eq!(p.to_string(), "accommodation.create");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Permission {
    /// Entity family the permission applies to.
    pub entity: EntityKind,
    /// Permitted action.
    pub action: Action,
}

impl Permission {
    /// Pair an entity kind with an action.
    #[must_use]
    pub const fn new(entity: EntityKind, action: Action) -> Self {
        Self { entity, action }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.entity.as_str(), self.action.as_str())
    }
}

/// Coarse role assigned to every platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including hard deletes.
    Admin,
    /// Content management without hard deletes.
    Editor,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// Stable lowercase identifier for persistence and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Parse the persisted identifier back into a role.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Whether the role alone implies `action` on any entity.
    #[must_use]
    pub const fn implies(self, action: Action) -> bool {
        match self {
            Self::Admin => true,
            Self::Editor => true,
            Self::Viewer => matches!(action, Action::View),
        }
    }
}

/// The authenticated principal performing an operation.
///
/// ## Invariants
/// - `grants` only widens the role's implied set; it never revokes.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Identifier of the backing user record.
    pub user_id: Uuid,
    /// Display name for logs.
    pub display_name: String,
    /// Assigned role.
    pub role: Role,
    /// Extra permissions beyond the role's implied set.
    pub grants: Vec<Permission>,
}

impl Actor {
    /// Construct an actor with no extra grants.
    #[must_use]
    pub const fn new(user_id: Uuid, display_name: String, role: Role) -> Self {
        Self {
            user_id,
            display_name,
            role,
            grants: Vec::new(),
        }
    }

    /// Extend the actor with explicit permission grants.
    #[must_use]
    pub fn with_grants(mut self, grants: Vec<Permission>) -> Self {
        self.grants = grants;
        self
    }

    /// Whether the actor holds `permission`, via role or explicit grant.
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        self.role.implies(permission.action) || self.grants.contains(&permission)
    }

    /// Whether the actor may hard-delete records. Admin only.
    #[must_use]
    pub const fn can_hard_delete(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn actor(role: Role) -> Actor {
        Actor::new(Uuid::new_v4(), "test".to_owned(), role)
    }

    #[rstest]
    #[case(Role::Admin, Action::Delete, true)]
    #[case(Role::Editor, Action::Create, true)]
    #[case(Role::Editor, Action::Delete, true)]
    #[case(Role::Viewer, Action::View, true)]
    #[case(Role::Viewer, Action::Create, false)]
    fn role_implication(#[case] role: Role, #[case] action: Action, #[case] expected: bool) {
        let permission = Permission::new(EntityKind::Tag, action);
        assert_eq!(actor(role).can(permission), expected);
    }

    #[test]
    fn grants_widen_a_viewer() {
        let create_events = Permission::new(EntityKind::Event, Action::Create);
        let widened = actor(Role::Viewer).with_grants(vec![create_events]);
        assert!(widened.can(create_events));
        assert!(!widened.can(Permission::new(EntityKind::Event, Action::Update)));
    }

    #[rstest]
    #[case(Role::Admin, true)]
    #[case(Role::Editor, false)]
    #[case(Role::Viewer, false)]
    fn hard_delete_is_admin_only(#[case] role: Role, #[case] expected: bool) {
        assert_eq!(actor(role).can_hard_delete(), expected);
    }

    #[test]
    fn permission_renders_dotted_name() {
        let p = Permission::new(EntityKind::DiscountCode, Action::Restore);
        assert_eq!(p.to_string(), "discount-code.restore");
    }
}
