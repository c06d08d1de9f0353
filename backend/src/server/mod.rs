//! Server construction and middleware wiring.

mod config;
pub mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::{AppSettings, SettingsError};

pub(crate) use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{api_scope, json_config, query_config, route_not_found};
use crate::middleware::{Disclosure, ErrorDisclosure};

/// Shared handles cloned into every worker's application.
#[derive(Clone)]
pub struct AppDependencies {
    /// Probe state.
    pub health_state: web::Data<HealthState>,
    /// Contact ports.
    pub http_state: web::Data<HttpState>,
    /// How much detail server errors reveal.
    pub disclosure: ErrorDisclosure,
}

/// Assemble the application: contacts API, health probes, request
/// middleware and, in debug builds, Swagger UI.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        disclosure,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Disclosure(disclosure))
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
}

/// Construct an Actix HTTP server from `config`.
///
/// Readiness flips to ready once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let (server, _) = bind_server(health_state, config)?;
    Ok(server)
}

/// Like [`create_server`], also reporting the bound addresses. Useful when
/// binding port 0.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn bind_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<(Server, Vec<std::net::SocketAddr>)> {
    let http_state = build_http_state(config.db_pool.as_ref());
    let ServerConfig {
        bind_addr,
        disclosure,
        db_pool: _,
    } = config;

    let server_health_state = health_state.clone();
    let http_server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            disclosure,
        })
    })
    .bind(bind_addr)?;
    let addrs = http_server.addrs();
    let server = http_server.run();

    health_state.mark_ready();
    Ok((server, addrs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    use crate::domain::TRACE_ID_HEADER;

    fn deps(disclosure: ErrorDisclosure) -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(None),
            disclosure,
        }
    }

    #[actix_rt::test]
    async fn unknown_route_is_a_traced_not_found() {
        let app = test::init_service(build_app(deps(ErrorDisclosure::Redacted))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/unknown").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace id header");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["message"], "Route not found");
        assert_eq!(body["traceId"], Value::String(header));
    }

    #[actix_rt::test]
    async fn malformed_json_is_an_invalid_request() {
        let app = test::init_service(build_app(deps(ErrorDisclosure::Verbose))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/contacts")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["message"], "Invalid request body");
    }

    #[actix_rt::test]
    async fn probes_are_mounted() {
        let deps = deps(ErrorDisclosure::Redacted);
        deps.health_state.mark_ready();
        let app = test::init_service(build_app(deps)).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
