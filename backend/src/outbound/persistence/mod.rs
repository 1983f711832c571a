//! Persistence adapters: PostgreSQL via Diesel with bb8 pooling.

pub(crate) mod crud_macros;
pub mod diesel_catalog_repository;
pub mod diesel_user_store;
pub mod error_mapping;
pub mod models;
pub(crate) mod paging;
pub mod pool;
pub mod schema;

pub use diesel_catalog_repository::{
    DieselAccommodationRepository, DieselAdSlotRepository, DieselAmenityRepository,
    DieselDestinationRepository, DieselDiscountCodeRepository, DieselEventRepository,
    DieselPaymentMethodRepository, DieselTagRepository,
};
pub use diesel_user_store::DieselUserStore;
pub use pool::{DbPool, PoolConfig, PoolError};
