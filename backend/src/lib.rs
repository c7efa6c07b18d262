//! Contact relay for the portfolio site.
//!
//! Accepts contact form submissions over HTTP and forwards each one as an
//! email to the site owner through SMTP. Laid out as ports and adapters:
//! [`domain`] holds the use-case, [`inbound`] the HTTP surface and
//! [`outbound`] the SMTP transport. [`server`] wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
