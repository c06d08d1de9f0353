//! HTTP inbound adapter exposing the contacts REST API.

pub mod contacts;
pub mod error;
pub mod health;
pub mod state;

use actix_web::{HttpResponse, Scope, web};
use tracing::debug;

pub use error::ApiResult;
use error::Error;

/// Largest accepted JSON body.
pub const JSON_BODY_LIMIT: usize = 16 * 1024;

/// JSON extractor settings: malformed or oversized bodies become a 400 with
/// the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            debug!(error = %err, "rejecting malformed request body");
            Error::invalid_request("Invalid request body").into()
        })
}

/// Query extractor settings matching [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejecting malformed query string");
        Error::invalid_request("Invalid query parameters").into()
    })
}

/// Every route under `/api`.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(contacts::create_contact)
        .service(contacts::list_contacts)
        .service(contacts::delete_contact)
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Route not found"))
}
