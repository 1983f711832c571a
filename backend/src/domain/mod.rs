//! Domain layer: catalogue aggregates, the permission model, and the
//! generic CRUD service, all free of transport and persistence concerns.

pub mod actor;
pub mod audit;
pub mod catalog;
pub mod crud;
pub mod entity;
pub mod error;
pub mod ports;
pub mod slug;
pub mod user;
pub mod validation;

pub(crate) mod serde_ext;

pub use actor::{Action, Actor, EntityKind, Permission, Role};
pub use audit::AuditInfo;
pub use crud::{
    AccessPolicy, AccommodationQueries, AdSlotQueries, CrudOp, CrudService, DiscountCodeQueries,
    EntityCrud, EventQueries, PaymentMethodQueries, RolePolicy,
};
pub use entity::CrudEntity;
pub use error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use user::User;
pub use validation::{FieldIssue, Issues};
