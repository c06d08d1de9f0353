//! Contact book backend.
//!
//! The crate is laid out hexagonally: [`domain`] holds the contact model,
//! validation and service ports; [`inbound`] adapts HTTP requests onto those
//! ports; [`outbound`] provides PostgreSQL and in-memory stores; [`server`]
//! wires everything into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
