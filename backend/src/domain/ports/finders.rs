//! Bespoke finder ports beyond the uniform CRUD surface.
//!
//! Each trait is implemented by the corresponding repository adapter and
//! surfaced through the matching driving port on the CRUD service. All
//! finders exclude soft-deleted rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::catalog::{
    Accommodation, AdPlacement, AdSlot, DiscountCode, Event, PaymentKind, PaymentMethod,
};

use super::repository::{InMemoryRepository, RepositoryError};

/// Accommodations filtered by destination.
#[async_trait]
pub trait AccommodationsByDestination: Send + Sync {
    /// Page through active accommodations in `destination_id`.
    async fn find_by_destination(
        &self,
        destination_id: Uuid,
        page: &PageRequest,
    ) -> Result<Page<Accommodation>, RepositoryError>;
}

/// Events that have not yet ended.
#[async_trait]
pub trait UpcomingEvents: Send + Sync {
    /// Page through active events whose end time is after `now`.
    async fn find_upcoming(
        &self,
        now: DateTime<Utc>,
        page: &PageRequest,
    ) -> Result<Page<Event>, RepositoryError>;
}

/// Discount codes inside their validity window.
#[async_trait]
pub trait ActiveDiscountCodes: Send + Sync {
    /// Page through codes redeemable at `now`.
    async fn find_active(
        &self,
        now: DateTime<Utc>,
        page: &PageRequest,
    ) -> Result<Page<DiscountCode>, RepositoryError>;
}

/// Payment methods filtered by settlement channel.
#[async_trait]
pub trait PaymentMethodsByKind: Send + Sync {
    /// Page through active methods of `kind`.
    async fn find_by_kind(
        &self,
        kind: PaymentKind,
        page: &PageRequest,
    ) -> Result<Page<PaymentMethod>, RepositoryError>;
}

/// Ad slots filtered by placement.
#[async_trait]
pub trait AdSlotsByPlacement: Send + Sync {
    /// Page through active slots rendered at `placement`.
    async fn find_by_placement(
        &self,
        placement: AdPlacement,
        page: &PageRequest,
    ) -> Result<Page<AdSlot>, RepositoryError>;
}

#[async_trait]
impl AccommodationsByDestination for InMemoryRepository<Accommodation> {
    async fn find_by_destination(
        &self,
        destination_id: Uuid,
        page: &PageRequest,
    ) -> Result<Page<Accommodation>, RepositoryError> {
        Ok(self
            .page_filtered(page, |a| a.destination_id == destination_id)
            .await)
    }
}

#[async_trait]
impl UpcomingEvents for InMemoryRepository<Event> {
    async fn find_upcoming(
        &self,
        now: DateTime<Utc>,
        page: &PageRequest,
    ) -> Result<Page<Event>, RepositoryError> {
        Ok(self.page_filtered(page, |e| e.is_upcoming(now)).await)
    }
}

#[async_trait]
impl ActiveDiscountCodes for InMemoryRepository<DiscountCode> {
    async fn find_active(
        &self,
        now: DateTime<Utc>,
        page: &PageRequest,
    ) -> Result<Page<DiscountCode>, RepositoryError> {
        Ok(self.page_filtered(page, |c| c.is_active(now)).await)
    }
}

#[async_trait]
impl PaymentMethodsByKind for InMemoryRepository<PaymentMethod> {
    async fn find_by_kind(
        &self,
        kind: PaymentKind,
        page: &PageRequest,
    ) -> Result<Page<PaymentMethod>, RepositoryError> {
        Ok(self.page_filtered(page, |m| m.kind == kind).await)
    }
}

#[async_trait]
impl AdSlotsByPlacement for InMemoryRepository<AdSlot> {
    async fn find_by_placement(
        &self,
        placement: AdPlacement,
        page: &PageRequest,
    ) -> Result<Page<AdSlot>, RepositoryError> {
        Ok(self.page_filtered(page, |s| s.placement == placement).await)
    }
}
