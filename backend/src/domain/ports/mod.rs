//! Domain ports: the traits adapters implement.

pub(crate) mod macros;

pub mod finders;
pub mod repository;
pub mod users;

pub use finders::{
    AccommodationsByDestination, ActiveDiscountCodes, AdSlotsByPlacement, PaymentMethodsByKind,
    UpcomingEvents,
};
pub use repository::{CrudRepository, InMemoryRepository, RepositoryError};
pub use users::{InMemoryUserStore, UserStore, UserStoreError};

#[cfg(test)]
pub use users::MockUserStore;
