//! HTTP handlers and route configuration.

/// Build a test service over the full route table.
#[cfg(test)]
macro_rules! init_app {
    ($state:expr) => {{
        let state: crate::state::AppState = $state;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(state.clone()))
                .configure(|cfg| crate::handlers::configure_routes(cfg, &state)),
        )
        .await
    }};
}

mod auth;
mod backups;
pub mod form;
mod health;
mod posts;
mod search;

use actix_web::web;

use crate::middleware::error::{json_error_handler, query_error_handler};
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
///
/// Fixed `/posts/*` paths are registered ahead of `/posts/{id}` so they are
/// never captured as ids.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .route("/search", web::get().to(search::search_posts))
                .service(
                    web::resource("/posts/published").route(web::get().to(posts::published_posts)),
                )
                // Dashboard routes
                .service(
                    web::resource("/posts")
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post)),
                )
                .service(web::resource("/posts/stats").route(web::get().to(posts::post_stats)))
                .service(
                    web::resource("/posts/bulk-delete").route(web::post().to(posts::bulk_delete)),
                )
                .service(
                    web::resource("/posts/bulk-update").route(web::post().to(posts::bulk_update)),
                )
                .service(web::resource("/posts/reorder").route(web::put().to(posts::reorder_posts)))
                .service(
                    web::resource("/posts/{id}")
                        .route(web::put().to(posts::update_post))
                        .route(web::delete().to(posts::delete_post))
                        .route(web::patch().to(posts::toggle_post)),
                )
                .service(
                    web::resource("/backups")
                        .route(web::get().to(backups::list_backups))
                        .route(web::post().to(backups::create_backup)),
                )
                .service(
                    web::resource("/backups/download/{name}")
                        .route(web::get().to(backups::download_backup)),
                )
                .service(
                    web::resource("/backups/{name}")
                        .route(web::post().to(backups::restore_backup))
                        .route(web::delete().to(backups::delete_backup)),
                )
                // Auth routes
                .service(
                    web::scope("/auth")
                        .wrap(RateLimitMiddleware::new(
                            state.login_limiter.clone(),
                            state.trust_proxy_headers,
                        ))
                        .route("/login", web::post().to(auth::login)),
                ),
        );
}
