//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, key_fingerprint};
use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::CookieContentSecurity,
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tokio::task::JoinHandle;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::reference::{
    invalidate_reference_cache, list_agencies, list_boards, list_subjects, list_topics,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::submissions::submit_answer;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
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
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(submit_answer)
        .service(list_subjects)
        .service(list_boards)
        .service(list_agencies)
        .service(list_topics)
        .service(invalidate_reference_cache);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Create the HTTP server and start background workers.
///
/// Returns the Actix server future plus the cache sweeper handle; the server
/// owns request handling while the sweeper bounds cache memory.
///
/// # Errors
/// Returns [`std::io::Error`] when the listener cannot bind.
pub fn create_server(config: &ServerConfig) -> std::io::Result<(Server, JoinHandle<()>)> {
    let (http_state, sweeper) = build_http_state(config);
    let http_state = web::Data::new(http_state);
    let health_state = web::Data::new(HealthState::new());

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        key: config.key.clone(),
        cookie_secure: config.cookie_secure,
        same_site: config.same_site,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr())?
        .run();

    health_state.mark_ready();
    Ok((server, sweeper))
}
