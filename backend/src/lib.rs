//! Terraviva backend: permission-gated CRUD services over the tourism
//! catalogue, exposed as a REST API with cursor pagination, soft deletion,
//! API-key authentication, and OpenAPI documentation.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware attaching a `trace-id` to every response.
pub use middleware::Trace;
