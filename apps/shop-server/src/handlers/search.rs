//! Public title search.

use actix_web::{HttpResponse, web};

use shop_shared::dto::{SearchHit, SearchParams};

use crate::config::SEARCH_RESULT_LIMIT;
use crate::state::AppState;

/// GET /api/search?q=
///
/// A blank query or a store failure yields an empty list.
pub async fn search_posts(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> HttpResponse {
    let query = params.q.as_deref().unwrap_or("").trim();
    if query.is_empty() {
        return HttpResponse::Ok().json(Vec::<SearchHit>::new());
    }

    let hits: Vec<SearchHit> = match state.posts.search_active(query, SEARCH_RESULT_LIMIT).await {
        Ok(posts) => posts.into_iter().map(SearchHit::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Search failed");
            Vec::new()
        }
    };

    HttpResponse::Ok().json(hits)
}
