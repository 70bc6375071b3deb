//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use shop_core::domain::PostStats;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<PostStats>,
}

/// GET /api/health
///
/// Always 200; `degraded` when the posts document cannot be read.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, posts) = match state.posts.stats().await {
        Ok(stats) => ("ok", Some(stats)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read posts");
            ("degraded", None)
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        posts,
    })
}
