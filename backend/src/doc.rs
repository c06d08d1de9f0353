//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the contacts endpoints, the health probes and the
//! schemas they exchange. Swagger UI serves it in debug builds and
//! `openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::contacts::{
    ContactListResponse, ContactResponse, CreateContactRequest, PaginationBody,
};
use crate::inbound::http::error::{Error, ErrorCode};
use crate::inbound::http::health::ProbeStatus;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contact book API",
        description = "Create, list and delete contacts, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ContactResponse,
        ContactListResponse,
        CreateContactRequest,
        PaginationBody,
        Error,
        ErrorCode,
        ProbeStatus
    )),
    tags(
        (name = "contacts", description = "Contact book operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
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

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("Error", "traceId")]
    #[case("ContactResponse", "email")]
    #[case("ContactResponse", "created_at")]
    #[case("PaginationBody", "totalPages")]
    fn schema_exposes_field(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/contacts")]
    #[case("/api/contacts/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn path_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
