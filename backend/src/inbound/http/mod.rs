//! HTTP inbound adapter exposing the catalogue REST API.

pub mod accommodations;
pub mod ad_slots;
pub mod amenities;
pub mod auth;
pub mod destinations;
pub mod discount_codes;
pub mod endpoints;
pub mod error;
pub mod events;
pub mod health;
pub mod paging;
pub mod payment_methods;
pub mod state;
pub mod tags;

pub use error::ApiResult;
