//! Contract implemented by every catalogue entity.
//!
//! The generic CRUD service and repositories only ever talk to entities
//! through this trait: validation of inbound payloads, construction from a
//! validated draft, and in-place application of partial changes.

use uuid::Uuid;

use super::actor::EntityKind;
use super::audit::AuditInfo;
use super::validation::Issues;

/// A catalogue aggregate with uniform CRUD semantics.
///
/// `Draft` is the full creation payload and `Changes` the partial update
/// payload; both arrive straight from deserialised request bodies and are
/// validated before any construction happens.
pub trait CrudEntity: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Entity family, used for permission names, routes, and logs.
    const KIND: EntityKind;

    /// Full creation payload.
    type Draft: Clone + std::fmt::Debug + Send + Sync + 'static;
    /// Partial update payload; absent fields are left untouched.
    type Changes: Clone + std::fmt::Debug + Send + Sync + 'static;

    /// Validate a creation payload, collecting every field issue.
    fn validate_draft(draft: &Self::Draft) -> Issues;

    /// Validate a partial update payload, collecting every field issue.
    fn validate_changes(changes: &Self::Changes) -> Issues;

    /// Validate changes against the stored record.
    ///
    /// Covers cross-field invariants where only one side of a pair is being
    /// changed (time windows, discounted vs base price). The default accepts
    /// everything; entities with such invariants override it.
    fn validate_against(current: &Self, changes: &Self::Changes) -> Issues {
        let (_, _) = (current, changes);
        Issues::new()
    }

    /// Build the entity from a validated draft.
    fn from_draft(draft: Self::Draft, id: Uuid, audit: AuditInfo) -> Self;

    /// Apply validated partial changes in place. Audit stamping is the
    /// caller's responsibility.
    fn apply_changes(&mut self, changes: Self::Changes);

    /// Primary identifier.
    fn id(&self) -> Uuid;

    /// Unique human-readable identifier (slug, or code for discount codes).
    fn slug(&self) -> &str;

    /// Audit block.
    fn audit(&self) -> &AuditInfo;

    /// Mutable audit block for lifecycle stamping.
    fn audit_mut(&mut self) -> &mut AuditInfo;

    /// Lowercased text searched by the `search` operation.
    fn search_haystack(&self) -> String;
}
