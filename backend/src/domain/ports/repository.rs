//! Generic persistence port for catalogue entities.
//!
//! Adapters provide durable storage (PostgreSQL via Diesel) or an in-memory
//! fixture for tests and database-less development. The port speaks domain
//! entities; row mapping stays inside the adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::audit::AuditInfo;
use crate::domain::entity::CrudEntity;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// Storage connection could not be established or checked out.
        Connection { message: String } =>
            "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "repository query failed: {message}",
        /// A uniqueness constraint was violated.
        Conflict { message: String } =>
            "repository conflict: {message}",
    }
}

/// Persistence port for one catalogue entity family.
///
/// # Soft-delete semantics
///
/// - `find_by_id` excludes soft-deleted rows unless `include_deleted` is set.
/// - `soft_delete` only affects active rows and reports whether one matched.
/// - `restore` operates on any row; restoring an active row is a no-op that
///   returns the row unchanged.
/// - `list` and `search` never include soft-deleted rows.
#[async_trait]
pub trait CrudRepository<E: CrudEntity>: Send + Sync {
    /// Persist a new record built from a validated draft.
    async fn insert(&self, draft: E::Draft, actor: Uuid) -> Result<E, RepositoryError>;

    /// Apply validated changes to an active record.
    ///
    /// Returns `None` when no active record has this id.
    async fn update(
        &self,
        id: Uuid,
        changes: E::Changes,
        actor: Uuid,
    ) -> Result<Option<E>, RepositoryError>;

    /// Fetch one record by id.
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<E>, RepositoryError>;

    /// Fetch one active record by slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<E>, RepositoryError>;

    /// Soft-delete an active record; `true` when a row was marked.
    async fn soft_delete(&self, id: Uuid, actor: Uuid) -> Result<bool, RepositoryError>;

    /// Clear a soft delete. Returns the (possibly unchanged) record, or
    /// `None` when the id is unknown.
    async fn restore(&self, id: Uuid, actor: Uuid) -> Result<Option<E>, RepositoryError>;

    /// Remove a record permanently; `true` when a row was removed.
    async fn hard_delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Page through active records in creation order.
    async fn list(&self, page: &PageRequest) -> Result<Page<E>, RepositoryError>;

    /// Page through active records whose searchable text contains `needle`
    /// (case-insensitive).
    async fn search(&self, needle: &str, page: &PageRequest)
    -> Result<Page<E>, RepositoryError>;
}

/// In-memory fixture repository for tests and database-less startup.
///
/// Keeps records in a map plus an insertion-order index so listings are
/// stable. All semantics mirror the Diesel adapter, including slug
/// uniqueness.
#[derive(Debug, Default)]
pub struct InMemoryRepository<E> {
    inner: RwLock<Store<E>>,
}

#[derive(Debug)]
struct Store<E> {
    records: HashMap<Uuid, E>,
    order: Vec<Uuid>,
}

impl<E> Default for Store<E> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<E> InMemoryRepository<E> {
    /// Create an empty fixture repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Store::default()),
        }
    }
}

impl<E: CrudEntity> InMemoryRepository<E> {
    /// Page through active records satisfying `keep`, in creation order.
    pub(crate) async fn page_filtered<F>(&self, page: &PageRequest, keep: F) -> Page<E>
    where
        F: Fn(&E) -> bool,
    {
        let store = self.inner.read().await;
        let matching: Vec<&E> = store
            .order
            .iter()
            .filter_map(|id| store.records.get(id))
            .filter(|e| !e.audit().is_deleted() && keep(e))
            .collect();
        paginate(matching, page)
    }
}

fn paginate<E: Clone>(matching: Vec<&E>, page: &PageRequest) -> Page<E> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    let items: Vec<E> = matching
        .iter()
        .skip(offset)
        .take(limit)
        .map(|e| (*e).clone())
        .collect();
    let has_more = matching.len() > offset.saturating_add(items.len());
    Page::from_items(items, page, has_more)
}

#[async_trait]
impl<E: CrudEntity> CrudRepository<E> for InMemoryRepository<E> {
    async fn insert(&self, draft: E::Draft, actor: Uuid) -> Result<E, RepositoryError> {
        let entity = E::from_draft(draft, Uuid::new_v4(), AuditInfo::created_now(actor));
        let mut store = self.inner.write().await;
        if store.records.values().any(|e| e.slug() == entity.slug()) {
            return Err(RepositoryError::conflict(format!(
                "slug {} is already taken",
                entity.slug()
            )));
        }
        store.order.push(entity.id());
        store.records.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: E::Changes,
        actor: Uuid,
    ) -> Result<Option<E>, RepositoryError> {
        let mut store = self.inner.write().await;
        let Some(entity) = store.records.get_mut(&id) else {
            return Ok(None);
        };
        if entity.audit().is_deleted() {
            return Ok(None);
        }
        entity.apply_changes(changes);
        entity.audit_mut().touch(actor);
        Ok(Some(entity.clone()))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<E>, RepositoryError> {
        let store = self.inner.read().await;
        Ok(store
            .records
            .get(&id)
            .filter(|e| include_deleted || !e.audit().is_deleted())
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<E>, RepositoryError> {
        let store = self.inner.read().await;
        Ok(store
            .records
            .values()
            .find(|e| e.slug() == slug && !e.audit().is_deleted())
            .cloned())
    }

    async fn soft_delete(&self, id: Uuid, actor: Uuid) -> Result<bool, RepositoryError> {
        let mut store = self.inner.write().await;
        let Some(entity) = store.records.get_mut(&id) else {
            return Ok(false);
        };
        if entity.audit().is_deleted() {
            return Ok(false);
        }
        entity.audit_mut().mark_deleted(actor);
        Ok(true)
    }

    async fn restore(&self, id: Uuid, actor: Uuid) -> Result<Option<E>, RepositoryError> {
        let mut store = self.inner.write().await;
        let Some(entity) = store.records.get_mut(&id) else {
            return Ok(None);
        };
        if entity.audit().is_deleted() {
            entity.audit_mut().clear_deleted(actor);
        }
        Ok(Some(entity.clone()))
    }

    async fn hard_delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut store = self.inner.write().await;
        store.order.retain(|existing| *existing != id);
        Ok(store.records.remove(&id).is_some())
    }

    async fn list(&self, page: &PageRequest) -> Result<Page<E>, RepositoryError> {
        let store = self.inner.read().await;
        let matching: Vec<&E> = store
            .order
            .iter()
            .filter_map(|id| store.records.get(id))
            .filter(|e| !e.audit().is_deleted())
            .collect();
        Ok(paginate(matching, page))
    }

    async fn search(
        &self,
        needle: &str,
        page: &PageRequest,
    ) -> Result<Page<E>, RepositoryError> {
        let lowered = needle.to_lowercase();
        let store = self.inner.read().await;
        let matching: Vec<&E> = store
            .order
            .iter()
            .filter_map(|id| store.records.get(id))
            .filter(|e| !e.audit().is_deleted() && e.search_haystack().contains(&lowered))
            .collect();
        Ok(paginate(matching, page))
    }
}
