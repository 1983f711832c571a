//! PostgreSQL-backed CRUD repositories for the catalogue tables.
//!
//! Each repository pairs the shared [`impl_diesel_crud!`] lifecycle with any
//! bespoke finder ports its entity exposes. Row mapping lives in
//! [`super::models`]; these adapters only run queries and translate errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::catalog::{
    Accommodation, AdPlacement, AdSlot, Amenity, Destination, DiscountCode, Event, PaymentKind,
    PaymentMethod, Tag,
};
use crate::domain::ports::{
    AccommodationsByDestination, ActiveDiscountCodes, AdSlotsByPlacement, PaymentMethodsByKind,
    RepositoryError, UpcomingEvents,
};

use super::crud_macros::impl_diesel_crud;
use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    AccommodationRow, AdSlotRow, AmenityRow, DestinationRow, DiscountCodeRow, EventRow,
    PaymentMethodRow, TagRow,
};
use super::paging::{collect_page, sql_limit, sql_offset};
use super::pool::DbPool;
use super::schema::{
    accommodations, ad_slots, amenities, destinations, discount_codes, events, payment_methods,
    tags,
};

/// Declare a pooled repository struct with a `new` constructor.
macro_rules! pooled_repository {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            pool: DbPool,
        }

        impl $name {
            /// Create a repository backed by the given connection pool.
            #[must_use]
            pub const fn new(pool: DbPool) -> Self {
                Self { pool }
            }
        }
    };
}

pooled_repository! {
    /// Diesel adapter for accommodations.
    DieselAccommodationRepository
}
pooled_repository! {
    /// Diesel adapter for destinations.
    DieselDestinationRepository
}
pooled_repository! {
    /// Diesel adapter for amenities.
    DieselAmenityRepository
}
pooled_repository! {
    /// Diesel adapter for tags.
    DieselTagRepository
}
pooled_repository! {
    /// Diesel adapter for events.
    DieselEventRepository
}
pooled_repository! {
    /// Diesel adapter for discount codes.
    DieselDiscountCodeRepository
}
pooled_repository! {
    /// Diesel adapter for payment methods.
    DieselPaymentMethodRepository
}
pooled_repository! {
    /// Diesel adapter for ad slots.
    DieselAdSlotRepository
}

impl_diesel_crud! {
    impl CrudRepository<Accommodation> for DieselAccommodationRepository {
        row: AccommodationRow,
        table: accommodations,
        slug_column: slug,
        search(pattern): accommodations::slug
            .ilike(pattern.clone())
            .or(accommodations::name.ilike(pattern)),
    }
}

impl_diesel_crud! {
    impl CrudRepository<Destination> for DieselDestinationRepository {
        row: DestinationRow,
        table: destinations,
        slug_column: slug,
        search(pattern): destinations::slug
            .ilike(pattern.clone())
            .or(destinations::name.ilike(pattern.clone()))
            .or(destinations::country_code.ilike(pattern)),
    }
}

impl_diesel_crud! {
    impl CrudRepository<Amenity> for DieselAmenityRepository {
        row: AmenityRow,
        table: amenities,
        slug_column: slug,
        search(pattern): amenities::slug
            .ilike(pattern.clone())
            .or(amenities::name.ilike(pattern)),
    }
}

impl_diesel_crud! {
    impl CrudRepository<Tag> for DieselTagRepository {
        row: TagRow,
        table: tags,
        slug_column: slug,
        search(pattern): tags::slug
            .ilike(pattern.clone())
            .or(tags::name.ilike(pattern)),
    }
}

impl_diesel_crud! {
    impl CrudRepository<Event> for DieselEventRepository {
        row: EventRow,
        table: events,
        slug_column: slug,
        search(pattern): events::slug
            .ilike(pattern.clone())
            .or(events::name.ilike(pattern)),
    }
}

impl_diesel_crud! {
    impl CrudRepository<DiscountCode> for DieselDiscountCodeRepository {
        row: DiscountCodeRow,
        table: discount_codes,
        slug_column: code,
        search(pattern): discount_codes::code.ilike(pattern),
    }
}

impl_diesel_crud! {
    impl CrudRepository<PaymentMethod> for DieselPaymentMethodRepository {
        row: PaymentMethodRow,
        table: payment_methods,
        slug_column: slug,
        search(pattern): payment_methods::slug
            .ilike(pattern.clone())
            .or(payment_methods::display_name.ilike(pattern)),
    }
}

impl_diesel_crud! {
    impl CrudRepository<AdSlot> for DieselAdSlotRepository {
        row: AdSlotRow,
        table: ad_slots,
        slug_column: slug,
        search(pattern): ad_slots::slug.ilike(pattern),
    }
}

#[async_trait]
impl AccommodationsByDestination for DieselAccommodationRepository {
    async fn find_by_destination(
        &self,
        destination_id: Uuid,
        page: &PageRequest,
    ) -> Result<Page<Accommodation>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AccommodationRow> = accommodations::table
            .filter(accommodations::destination_id.eq(destination_id))
            .filter(accommodations::deleted_at.is_null())
            .order((accommodations::created_at.asc(), accommodations::id.asc()))
            .offset(sql_offset(page))
            .limit(sql_limit(page))
            .select(AccommodationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_page(rows, page)
    }
}

#[async_trait]
impl UpcomingEvents for DieselEventRepository {
    async fn find_upcoming(
        &self,
        now: DateTime<Utc>,
        page: &PageRequest,
    ) -> Result<Page<Event>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = events::table
            .filter(events::ends_at.gt(now))
            .filter(events::deleted_at.is_null())
            .order((events::starts_at.asc(), events::id.asc()))
            .offset(sql_offset(page))
            .limit(sql_limit(page))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_page(rows, page)
    }
}

#[async_trait]
impl ActiveDiscountCodes for DieselDiscountCodeRepository {
    async fn find_active(
        &self,
        now: DateTime<Utc>,
        page: &PageRequest,
    ) -> Result<Page<DiscountCode>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DiscountCodeRow> = discount_codes::table
            .filter(discount_codes::valid_from.le(now))
            .filter(discount_codes::valid_until.gt(now))
            .filter(discount_codes::deleted_at.is_null())
            .order((discount_codes::valid_until.asc(), discount_codes::id.asc()))
            .offset(sql_offset(page))
            .limit(sql_limit(page))
            .select(DiscountCodeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_page(rows, page)
    }
}

#[async_trait]
impl PaymentMethodsByKind for DieselPaymentMethodRepository {
    async fn find_by_kind(
        &self,
        kind: PaymentKind,
        page: &PageRequest,
    ) -> Result<Page<PaymentMethod>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PaymentMethodRow> = payment_methods::table
            .filter(payment_methods::kind.eq(kind.as_str()))
            .filter(payment_methods::deleted_at.is_null())
            .order((payment_methods::created_at.asc(), payment_methods::id.asc()))
            .offset(sql_offset(page))
            .limit(sql_limit(page))
            .select(PaymentMethodRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_page(rows, page)
    }
}

#[async_trait]
impl AdSlotsByPlacement for DieselAdSlotRepository {
    async fn find_by_placement(
        &self,
        placement: AdPlacement,
        page: &PageRequest,
    ) -> Result<Page<AdSlot>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AdSlotRow> = ad_slots::table
            .filter(ad_slots::placement.eq(placement.as_str()))
            .filter(ad_slots::deleted_at.is_null())
            .order((ad_slots::created_at.asc(), ad_slots::id.asc()))
            .offset(sql_offset(page))
            .limit(sql_limit(page))
            .select(AdSlotRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_page(rows, page)
    }
}
