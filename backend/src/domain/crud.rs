//! Generic permission-gated CRUD service.
//!
//! Every operation follows the same lifecycle: validate the payload, run the
//! entity's access policy, perform the repository call, log the outcome, and
//! translate failures into the domain error taxonomy. Handlers depend on the
//! driving traits here, never on repositories.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Page, PageRequest};
use tracing::{info, warn};
use uuid::Uuid;

use super::actor::{Action, Actor, Permission};
use super::catalog::{
    Accommodation, AdPlacement, AdSlot, DiscountCode, Event, PaymentKind, PaymentMethod,
};
use super::entity::CrudEntity;
use super::error::Error;
use super::ports::{
    AccommodationsByDestination, ActiveDiscountCodes, AdSlotsByPlacement, CrudRepository,
    PaymentMethodsByKind, RepositoryError, UpcomingEvents,
};
use super::validation::Issues;

/// The uniform operations of the CRUD lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudOp {
    /// Create a new record.
    Create,
    /// Partially update a record.
    Update,
    /// Mark a record deleted.
    SoftDelete,
    /// Remove a record permanently.
    HardDelete,
    /// Bring a soft-deleted record back.
    Restore,
    /// Fetch one record by id.
    Get,
    /// Fetch one record by slug.
    GetBySlug,
    /// Page through active records.
    List,
    /// Page through records matching a needle.
    Search,
}

impl CrudOp {
    /// Permission action gating this operation.
    #[must_use]
    pub const fn action(self) -> Action {
        match self {
            Self::Create => Action::Create,
            Self::Update => Action::Update,
            Self::SoftDelete | Self::HardDelete => Action::Delete,
            Self::Restore => Action::Restore,
            Self::Get | Self::GetBySlug | Self::List | Self::Search => Action::View,
        }
    }

    /// Stable identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::SoftDelete => "soft_delete",
            Self::HardDelete => "hard_delete",
            Self::Restore => "restore",
            Self::Get => "get",
            Self::GetBySlug => "get_by_slug",
            Self::List => "list",
            Self::Search => "search",
        }
    }
}

impl std::fmt::Display for CrudOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overridable permission hook consulted before every operation.
///
/// The default grants the operation when the actor holds the
/// `entity.action` permission, with hard deletes additionally restricted to
/// administrators. Entities needing stricter rules install their own policy
/// via [`CrudService::with_policy`].
pub trait AccessPolicy<E: CrudEntity>: Send + Sync {
    /// Allow or deny `op` for `actor`.
    ///
    /// # Errors
    /// Returns [`Error::forbidden`] when the actor lacks the required
    /// permission.
    fn check(&self, actor: &Actor, op: CrudOp) -> Result<(), Error> {
        let required = Permission::new(E::KIND, op.action());
        if !actor.can(required) {
            return Err(Error::forbidden(format!(
                "missing permission {required}"
            )));
        }
        if matches!(op, CrudOp::HardDelete) && !actor.can_hard_delete() {
            return Err(Error::forbidden("hard delete requires the admin role"));
        }
        Ok(())
    }
}

/// The default role-based policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl<E: CrudEntity> AccessPolicy<E> for RolePolicy {}

/// Driving port exposing the uniform CRUD lifecycle for one entity family.
#[async_trait]
pub trait EntityCrud<E: CrudEntity>: Send + Sync {
    /// Validate, authorise, and persist a new record.
    async fn create(&self, actor: &Actor, draft: E::Draft) -> Result<E, Error>;
    /// Validate, authorise, and apply partial changes.
    async fn update(&self, actor: &Actor, id: Uuid, changes: E::Changes) -> Result<E, Error>;
    /// Mark a record deleted.
    async fn soft_delete(&self, actor: &Actor, id: Uuid) -> Result<(), Error>;
    /// Remove a record permanently. Admin only.
    async fn hard_delete(&self, actor: &Actor, id: Uuid) -> Result<(), Error>;
    /// Bring a soft-deleted record back; a no-op on active records.
    async fn restore(&self, actor: &Actor, id: Uuid) -> Result<E, Error>;
    /// Fetch one active record by id.
    async fn get(&self, actor: &Actor, id: Uuid) -> Result<E, Error>;
    /// Fetch one active record by slug.
    async fn get_by_slug(&self, actor: &Actor, slug: &str) -> Result<E, Error>;
    /// Page through active records.
    async fn list(&self, actor: &Actor, page: PageRequest) -> Result<Page<E>, Error>;
    /// Page through active records matching `needle`.
    async fn search(
        &self,
        actor: &Actor,
        needle: &str,
        page: PageRequest,
    ) -> Result<Page<E>, Error>;
}

/// Driving port for destination-scoped accommodation listings.
#[async_trait]
pub trait AccommodationQueries: Send + Sync {
    /// Page through active accommodations in one destination.
    async fn by_destination(
        &self,
        actor: &Actor,
        destination_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Accommodation>, Error>;
}

/// Driving port for the upcoming-events listing.
#[async_trait]
pub trait EventQueries: Send + Sync {
    /// Page through events that have not yet ended.
    async fn upcoming(&self, actor: &Actor, page: PageRequest) -> Result<Page<Event>, Error>;
}

/// Driving port for the active-codes listing.
#[async_trait]
pub trait DiscountCodeQueries: Send + Sync {
    /// Page through codes inside their validity window.
    async fn active(&self, actor: &Actor, page: PageRequest)
    -> Result<Page<DiscountCode>, Error>;
}

/// Driving port for kind-scoped payment method listings.
#[async_trait]
pub trait PaymentMethodQueries: Send + Sync {
    /// Page through methods of one settlement channel.
    async fn by_kind(
        &self,
        actor: &Actor,
        kind: PaymentKind,
        page: PageRequest,
    ) -> Result<Page<PaymentMethod>, Error>;
}

/// Driving port for placement-scoped ad slot listings.
#[async_trait]
pub trait AdSlotQueries: Send + Sync {
    /// Page through slots rendered at one placement.
    async fn by_placement(
        &self,
        actor: &Actor,
        placement: AdPlacement,
        page: PageRequest,
    ) -> Result<Page<AdSlot>, Error>;
}

/// Map a repository failure into the domain taxonomy.
fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("repository unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("repository error: {message}"))
        }
        RepositoryError::Conflict { message } => Error::already_exists(message),
    }
}

/// Generic service wiring one repository behind the CRUD lifecycle.
pub struct CrudService<E, R> {
    repo: Arc<R>,
    policy: Arc<dyn AccessPolicy<E>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CrudEntity, R> CrudService<E, R> {
    /// Create a service with the default role-based policy.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            policy: Arc::new(RolePolicy),
            _entity: PhantomData,
        }
    }

    /// Replace the permission hook.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn AccessPolicy<E>>) -> Self {
        self.policy = policy;
        self
    }

    fn authorise(&self, actor: &Actor, op: CrudOp) -> Result<(), Error> {
        self.policy.check(actor, op).inspect_err(|_| {
            warn!(
                entity = E::KIND.as_str(),
                op = op.as_str(),
                actor = %actor.user_id,
                "permission denied"
            );
        })
    }

    fn not_found(id: Uuid) -> Error {
        Error::not_found(format!("{} {id} not found", E::KIND))
    }
}

#[async_trait]
impl<E, R> EntityCrud<E> for CrudService<E, R>
where
    E: CrudEntity,
    R: CrudRepository<E>,
{
    async fn create(&self, actor: &Actor, draft: E::Draft) -> Result<E, Error> {
        self.authorise(actor, CrudOp::Create)?;
        E::validate_draft(&draft).into_result()?;
        let entity = self
            .repo
            .insert(draft, actor.user_id)
            .await
            .map_err(map_repository_error)?;
        info!(
            entity = E::KIND.as_str(),
            op = "create",
            actor = %actor.user_id,
            id = %entity.id(),
            slug = entity.slug(),
            "record created"
        );
        Ok(entity)
    }

    async fn update(&self, actor: &Actor, id: Uuid, changes: E::Changes) -> Result<E, Error> {
        self.authorise(actor, CrudOp::Update)?;
        let mut issues = E::validate_changes(&changes);
        let current = self
            .repo
            .find_by_id(id, false)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;
        issues.extend(E::validate_against(&current, &changes));
        issues.into_result()?;
        let updated = self
            .repo
            .update(id, changes, actor.user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;
        info!(
            entity = E::KIND.as_str(),
            op = "update",
            actor = %actor.user_id,
            id = %id,
            "record updated"
        );
        Ok(updated)
    }

    async fn soft_delete(&self, actor: &Actor, id: Uuid) -> Result<(), Error> {
        self.authorise(actor, CrudOp::SoftDelete)?;
        let marked = self
            .repo
            .soft_delete(id, actor.user_id)
            .await
            .map_err(map_repository_error)?;
        if !marked {
            return Err(Self::not_found(id));
        }
        info!(
            entity = E::KIND.as_str(),
            op = "soft_delete",
            actor = %actor.user_id,
            id = %id,
            "record soft-deleted"
        );
        Ok(())
    }

    async fn hard_delete(&self, actor: &Actor, id: Uuid) -> Result<(), Error> {
        self.authorise(actor, CrudOp::HardDelete)?;
        let removed = self
            .repo
            .hard_delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Self::not_found(id));
        }
        info!(
            entity = E::KIND.as_str(),
            op = "hard_delete",
            actor = %actor.user_id,
            id = %id,
            "record permanently removed"
        );
        Ok(())
    }

    async fn restore(&self, actor: &Actor, id: Uuid) -> Result<E, Error> {
        self.authorise(actor, CrudOp::Restore)?;
        let restored = self
            .repo
            .restore(id, actor.user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;
        info!(
            entity = E::KIND.as_str(),
            op = "restore",
            actor = %actor.user_id,
            id = %id,
            "record restored"
        );
        Ok(restored)
    }

    async fn get(&self, actor: &Actor, id: Uuid) -> Result<E, Error> {
        self.authorise(actor, CrudOp::Get)?;
        self.repo
            .find_by_id(id, false)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn get_by_slug(&self, actor: &Actor, slug: &str) -> Result<E, Error> {
        self.authorise(actor, CrudOp::GetBySlug)?;
        self.repo
            .find_by_slug(slug)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("{} {slug} not found", E::KIND)))
    }

    async fn list(&self, actor: &Actor, page: PageRequest) -> Result<Page<E>, Error> {
        self.authorise(actor, CrudOp::List)?;
        self.repo.list(&page).await.map_err(map_repository_error)
    }

    async fn search(
        &self,
        actor: &Actor,
        needle: &str,
        page: PageRequest,
    ) -> Result<Page<E>, Error> {
        self.authorise(actor, CrudOp::Search)?;
        self.repo
            .search(needle, &page)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> AccommodationQueries for CrudService<Accommodation, R>
where
    R: CrudRepository<Accommodation> + AccommodationsByDestination,
{
    async fn by_destination(
        &self,
        actor: &Actor,
        destination_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Accommodation>, Error> {
        self.authorise(actor, CrudOp::List)?;
        self.repo
            .find_by_destination(destination_id, &page)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> EventQueries for CrudService<Event, R>
where
    R: CrudRepository<Event> + UpcomingEvents,
{
    async fn upcoming(&self, actor: &Actor, page: PageRequest) -> Result<Page<Event>, Error> {
        self.authorise(actor, CrudOp::List)?;
        self.repo
            .find_upcoming(Utc::now(), &page)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> DiscountCodeQueries for CrudService<DiscountCode, R>
where
    R: CrudRepository<DiscountCode> + ActiveDiscountCodes,
{
    async fn active(
        &self,
        actor: &Actor,
        page: PageRequest,
    ) -> Result<Page<DiscountCode>, Error> {
        self.authorise(actor, CrudOp::List)?;
        self.repo
            .find_active(Utc::now(), &page)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> PaymentMethodQueries for CrudService<PaymentMethod, R>
where
    R: CrudRepository<PaymentMethod> + PaymentMethodsByKind,
{
    async fn by_kind(
        &self,
        actor: &Actor,
        kind: PaymentKind,
        page: PageRequest,
    ) -> Result<Page<PaymentMethod>, Error> {
        self.authorise(actor, CrudOp::List)?;
        self.repo
            .find_by_kind(kind, &page)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> AdSlotQueries for CrudService<AdSlot, R>
where
    R: CrudRepository<AdSlot> + AdSlotsByPlacement,
{
    async fn by_placement(
        &self,
        actor: &Actor,
        placement: AdPlacement,
        page: PageRequest,
    ) -> Result<Page<AdSlot>, Error> {
        self.authorise(actor, CrudOp::List)?;
        self.repo
            .find_by_placement(placement, &page)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests;
