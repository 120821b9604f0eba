//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use conduct_desk::Trace;
#[cfg(debug_assertions)]
use conduct_desk::doc::ApiDoc;
use conduct_desk::inbound::http::health::{HealthState, live, ready};
use conduct_desk::inbound::http::pages::{self, PageDirectory};
use conduct_desk::inbound::http::session::session_middleware;
use conduct_desk::inbound::http::session_config::SessionSettings;
use conduct_desk::inbound::http::state::HttpState;
use conduct_desk::inbound::http::{configure_api, json_config};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    pages: web::Data<PageDirectory>,
    session: SessionSettings,
}

fn build_app(
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
        pages,
        session,
    } = deps;

    let api = web::scope("/api/v1").configure(configure_api);
    let assets = pages.assets();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(pages)
        .app_data(json_config())
        .wrap(session_middleware(&session))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
        .configure(pages::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app.service(assets)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The session middleware wraps every route so protected pages and API
/// handlers read the same cookie.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        session,
        bind_addr,
        http_state,
        pages,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            pages: pages.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
