//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain's driving ports and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::catalog::{
    Accommodation, AdSlot, Amenity, Destination, DiscountCode, Event, PaymentMethod, Tag,
};
use crate::domain::ports::{InMemoryRepository, InMemoryUserStore};
use crate::domain::user::User;
use crate::domain::{
    AccommodationQueries, Action, AdSlotQueries, CrudService, DiscountCodeQueries, EntityCrud,
    EventQueries, PaymentMethodQueries, Permission, Role,
};
use crate::inbound::http::auth;
use crate::outbound::cache::{UserCache, UserCacheConfig};
use crate::outbound::persistence::{
    DbPool, DieselAccommodationRepository, DieselAdSlotRepository, DieselAmenityRepository,
    DieselDestinationRepository, DieselDiscountCodeRepository, DieselEventRepository,
    DieselPaymentMethodRepository, DieselTagRepository, DieselUserStore,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Accommodation CRUD lifecycle.
    pub accommodations: Arc<dyn EntityCrud<Accommodation>>,
    /// Destination CRUD lifecycle.
    pub destinations: Arc<dyn EntityCrud<Destination>>,
    /// Amenity CRUD lifecycle.
    pub amenities: Arc<dyn EntityCrud<Amenity>>,
    /// Tag CRUD lifecycle.
    pub tags: Arc<dyn EntityCrud<Tag>>,
    /// Event CRUD lifecycle.
    pub events: Arc<dyn EntityCrud<Event>>,
    /// Discount code CRUD lifecycle.
    pub discount_codes: Arc<dyn EntityCrud<DiscountCode>>,
    /// Payment method CRUD lifecycle.
    pub payment_methods: Arc<dyn EntityCrud<PaymentMethod>>,
    /// Ad slot CRUD lifecycle.
    pub ad_slots: Arc<dyn EntityCrud<AdSlot>>,
    /// Destination-scoped accommodation listings.
    pub accommodation_queries: Arc<dyn AccommodationQueries>,
    /// Upcoming-event listings.
    pub event_queries: Arc<dyn EventQueries>,
    /// Active-code listings.
    pub discount_code_queries: Arc<dyn DiscountCodeQueries>,
    /// Kind-scoped payment method listings.
    pub payment_method_queries: Arc<dyn PaymentMethodQueries>,
    /// Placement-scoped ad slot listings.
    pub ad_slot_queries: Arc<dyn AdSlotQueries>,
    /// Cached API-key user lookups backing authentication.
    pub users: Arc<UserCache>,
    /// Connection pool, absent when running on fixtures.
    pub db: Option<DbPool>,
}

impl HttpState {
    /// Wire every port to its Diesel adapter over the given pool.
    #[must_use]
    pub fn from_pool(pool: DbPool, cache_config: UserCacheConfig) -> Self {
        let accommodations = Arc::new(CrudService::<Accommodation, _>::new(Arc::new(
            DieselAccommodationRepository::new(pool.clone()),
        )));
        let events = Arc::new(CrudService::<Event, _>::new(Arc::new(
            DieselEventRepository::new(pool.clone()),
        )));
        let discount_codes = Arc::new(CrudService::<DiscountCode, _>::new(Arc::new(
            DieselDiscountCodeRepository::new(pool.clone()),
        )));
        let payment_methods = Arc::new(CrudService::<PaymentMethod, _>::new(Arc::new(
            DieselPaymentMethodRepository::new(pool.clone()),
        )));
        let ad_slots = Arc::new(CrudService::<AdSlot, _>::new(Arc::new(
            DieselAdSlotRepository::new(pool.clone()),
        )));
        let users = Arc::new(UserCache::new(
            Arc::new(DieselUserStore::new(pool.clone())),
            cache_config,
        ));
        Self {
            destinations: Arc::new(CrudService::<Destination, _>::new(Arc::new(
                DieselDestinationRepository::new(pool.clone()),
            ))),
            amenities: Arc::new(CrudService::<Amenity, _>::new(Arc::new(
                DieselAmenityRepository::new(pool.clone()),
            ))),
            tags: Arc::new(CrudService::<Tag, _>::new(Arc::new(DieselTagRepository::new(
                pool.clone(),
            )))),
            accommodation_queries: accommodations.clone(),
            accommodations,
            event_queries: events.clone(),
            events,
            discount_code_queries: discount_codes.clone(),
            discount_codes,
            payment_method_queries: payment_methods.clone(),
            payment_methods,
            ad_slot_queries: ad_slots.clone(),
            ad_slots,
            users,
            db: Some(pool),
        }
    }

    /// Wire every port to in-memory fixtures, seeded with one user per role.
    ///
    /// Intended for database-less startup and integration tests. The seeded
    /// API keys are [`FIXTURE_ADMIN_KEY`], [`FIXTURE_EDITOR_KEY`], and
    /// [`FIXTURE_VIEWER_KEY`].
    pub async fn fixtures() -> Self {
        let store = InMemoryUserStore::new();
        store.add(fixture_user("Fixture admin", Role::Admin, FIXTURE_ADMIN_KEY)).await;
        store
            .add(fixture_user("Fixture editor", Role::Editor, FIXTURE_EDITOR_KEY))
            .await;
        store
            .add(fixture_user("Fixture viewer", Role::Viewer, FIXTURE_VIEWER_KEY))
            .await;
        Self::with_user_store(Arc::new(store))
    }

    /// Wire in-memory repositories around an externally built user store.
    #[must_use]
    pub fn with_user_store(store: Arc<InMemoryUserStore>) -> Self {
        let accommodations = Arc::new(CrudService::<Accommodation, _>::new(Arc::new(
            InMemoryRepository::<Accommodation>::new(),
        )));
        let events = Arc::new(CrudService::<Event, _>::new(Arc::new(
            InMemoryRepository::<Event>::new(),
        )));
        let discount_codes = Arc::new(CrudService::<DiscountCode, _>::new(Arc::new(
            InMemoryRepository::<DiscountCode>::new(),
        )));
        let payment_methods = Arc::new(CrudService::<PaymentMethod, _>::new(Arc::new(
            InMemoryRepository::<PaymentMethod>::new(),
        )));
        let ad_slots = Arc::new(CrudService::<AdSlot, _>::new(Arc::new(
            InMemoryRepository::<AdSlot>::new(),
        )));
        let cache_config = UserCacheConfig {
            capacity: 64,
            ttl: Duration::from_secs(60),
        };
        Self {
            destinations: Arc::new(CrudService::<Destination, _>::new(Arc::new(
                InMemoryRepository::<Destination>::new(),
            ))),
            amenities: Arc::new(CrudService::<Amenity, _>::new(Arc::new(
                InMemoryRepository::<Amenity>::new(),
            ))),
            tags: Arc::new(CrudService::<Tag, _>::new(Arc::new(
                InMemoryRepository::<Tag>::new(),
            ))),
            accommodation_queries: accommodations.clone(),
            accommodations,
            event_queries: events.clone(),
            events,
            discount_code_queries: discount_codes.clone(),
            discount_codes,
            payment_method_queries: payment_methods.clone(),
            payment_methods,
            ad_slot_queries: ad_slots.clone(),
            ad_slots,
            users: Arc::new(UserCache::new(store, cache_config)),
            db: None,
        }
    }
}

/// API key of the seeded fixture administrator.
pub const FIXTURE_ADMIN_KEY: &str = "terraviva-fixture-admin";
/// API key of the seeded fixture editor.
pub const FIXTURE_EDITOR_KEY: &str = "terraviva-fixture-editor";
/// API key of the seeded fixture viewer.
pub const FIXTURE_VIEWER_KEY: &str = "terraviva-fixture-viewer";

fn fixture_user(name: &str, role: Role, api_key: &str) -> User {
    let now = Utc::now();
    let grants = if matches!(role, Role::Viewer) {
        // Give the fixture viewer one widening grant so grant-based access
        // is exercisable without a database.
        vec![Permission::new(crate::domain::EntityKind::Tag, Action::Create)]
    } else {
        Vec::new()
    };
    User {
        id: Uuid::new_v4(),
        email: format!("{}@terraviva.example", role.as_str()),
        display_name: name.to_owned(),
        role,
        grants,
        key_fingerprint: auth::fingerprint(api_key),
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixtures_seed_one_user_per_role() {
        let state = HttpState::fixtures().await;
        for key in [FIXTURE_ADMIN_KEY, FIXTURE_EDITOR_KEY, FIXTURE_VIEWER_KEY] {
            let user = state
                .users
                .get_or_load(&auth::fingerprint(key))
                .await
                .expect("fixture lookup succeeds");
            assert!(user.is_some(), "fixture user for {key} should exist");
        }
        assert!(state.db.is_none());
    }
}
