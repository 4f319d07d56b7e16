//! Backend library for the Patente exam-preparation platform.
//!
//! The crate follows a hexagonal layout: `domain` holds the progression
//! engine, the reference-cache contracts, and the ports; `inbound` adapts
//! HTTP requests onto the driving ports; `outbound` implements the driven
//! ports against PostgreSQL and the in-process TTL cache.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

mod doc;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware.
pub use middleware::Trace;
/// Request-scoped trace identifier.
pub use domain::TraceId;
