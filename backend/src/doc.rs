//! OpenAPI documentation for the relay service.
//!
//! Registers the relay and health endpoints together with the payload
//! schemas. Swagger UI serves the document in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{RelayConfirmation, RelayErrorBody, RelayRequestSchema};

/// OpenAPI document for the relay HTTP interface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio contact relay",
        description = "Turns contact form submissions into emails to the site owner."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::relay::relay_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(RelayRequestSchema, RelayConfirmation, RelayErrorBody)),
    tags(
        (name = "relay", description = "Contact form delivery"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn documents_relay_and_probes() {
        let doc = ApiDoc::openapi();
        for path in ["/relay", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn relay_schemas_expose_contract_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let request = schemas.get("RelayRequestSchema").expect("request schema");
        for field in ["name", "email", "message"] {
            assert_object_schema_has_field(request, field);
        }
        let failure = schemas.get("RelayErrorBody").expect("error schema");
        assert_object_schema_has_field(failure, "error");
    }
}
