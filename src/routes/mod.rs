use crate::config::Config;
use crate::handlers;
use crate::services::ChatProxyService;
use actix_web::web;

/// Wires the proxy surface onto an app: welcome page, chat endpoint, and a
/// catch-all that answers CORS preflights and 404s everything else.
pub fn configure(app: &mut web::ServiceConfig, config: Config) {
    let service = web::Data::new(ChatProxyService::new(config.upstream()));

    app.app_data(web::Data::new(config))
        .app_data(service)
        .route("/", web::get().to(handlers::welcome_handler))
        .route("/", web::post().to(handlers::chat_handler))
        .default_service(web::to(handlers::fallback_handler));
}
