//! Post handlers - dashboard CRUD, bulk operations and the public feed.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use shop_core::DomainError;
use shop_core::domain::{NewPost, PostUpdate};
use shop_shared::SuccessResponse;
use shop_shared::dto::{
    BulkDeleteResponse, BulkIdsRequest, BulkStatusRequest, BulkUpdateResponse, CreatePostRequest,
    ListPostsParams, Pagination, PostListResponse, PublishedParams, PublishedResponse,
    ReorderRequest,
};

use super::form::{self, FormData, UploadedFile};
use crate::config::{HOMEPAGE_POSTS_PER_LOAD, POSTS_PER_PAGE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const NO_STORE: &str = "no-store, no-cache, must-revalidate, max-age=0";

fn not_found(id: &str) -> AppError {
    DomainError::post_not_found(id).into()
}

fn missing_fields() -> AppError {
    AppError::BadRequest("Missing required fields: title and product_url".to_string())
}

fn require_ids(ids: &[String]) -> AppResult<()> {
    if ids.is_empty() {
        Err(AppError::BadRequest("ids must be a non-empty array".to_string()))
    } else {
        Ok(())
    }
}

async fn store_upload(state: &AppState, file: &UploadedFile) -> AppResult<String> {
    let path = state
        .images
        .save_image(&file.bytes, &file.filename, file.content_type.as_deref())
        .await?;
    Ok(path)
}

/// GET /api/posts
///
/// Paginates when `page` or `limit` is given; a missing `limit` falls back
/// to the dashboard page size.
pub async fn list_posts(
    state: web::Data<AppState>,
    params: web::Query<ListPostsParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let mut query = params.to_query();
    if params.page.is_some() || params.limit.is_some() {
        query.page = Some(params.page.unwrap_or(1).max(1));
        query.limit = Some(params.limit.unwrap_or(POSTS_PER_PAGE).max(1));
    }

    let page = state.posts.list(&query).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: page.posts,
        pagination: Pagination {
            page: query.page.unwrap_or(1),
            limit: query.limit,
            total: page.total,
            pages: page.pages,
        },
    }))
}

/// GET /api/posts/published
///
/// Never fails: a store error is logged and answered with an empty feed.
pub async fn published_posts(
    state: web::Data<AppState>,
    params: web::Query<PublishedParams>,
) -> HttpResponse {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(HOMEPAGE_POSTS_PER_LOAD);

    let response = match state.posts.list_active(skip, limit).await {
        Ok((posts, total)) => PublishedResponse { posts, total },
        Err(e) => {
            tracing::error!(error = %e, "Failed to load published posts");
            PublishedResponse {
                posts: Vec::new(),
                total: 0,
            }
        }
    };

    HttpResponse::Ok().json(response)
}

/// POST /api/posts
///
/// Accepts a JSON body with an image path, or a multipart form carrying
/// the image file itself.
pub async fn create_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let post = if form::is_multipart(&req) {
        let mut form = FormData::read(form::multipart(&req, payload), state.max_image_bytes).await?;

        let (Some(title), Some(product_url)) = (form.text("title"), form.text("product_url"))
        else {
            return Err(missing_fields());
        };
        let file = form
            .take_file("image")
            .ok_or_else(|| AppError::BadRequest("Missing required fields: image".to_string()))?;
        file.ensure_image()?;

        let image = store_upload(&state, &file).await?;
        let data = NewPost {
            title,
            image: image.clone(),
            yt_url: form.text("yt_url"),
            product_url,
        };

        match state.posts.create(data).await {
            Ok(post) => post,
            Err(e) => {
                state.images.delete_image(&image).await;
                return Err(e.into());
            }
        }
    } else {
        let body: CreatePostRequest = form::read_json(payload).await?;
        let data = NewPost::from(body);
        data.validate()?;
        state.posts.create(data).await?
    };

    tracing::info!(post_id = %post.id, "Post created");
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = if form::is_multipart(&req) {
        let mut form = FormData::read(form::multipart(&req, payload), state.max_image_bytes).await?;

        let (Some(title), Some(product_url)) = (form.text("title"), form.text("product_url"))
        else {
            return Err(missing_fields());
        };
        let file = form.take_file("image");
        if let Some(file) = &file {
            file.ensure_image()?;
        }

        let previous = state.posts.find(&id).await?.ok_or_else(|| not_found(&id))?;
        let new_image = match &file {
            Some(file) => Some(store_upload(&state, file).await?),
            None => None,
        };

        let update = PostUpdate {
            title: Some(title),
            image: new_image.clone(),
            yt_url: form.raw_text("yt_url").map(|v| v.trim().to_string()),
            product_url: Some(product_url),
            ..Default::default()
        };

        let updated = state.posts.update(&id, update).await;
        match (updated, new_image) {
            (Ok(Some(post)), Some(new_image)) => {
                if !previous.image.is_empty() && previous.image != new_image {
                    state.images.delete_image(&previous.image).await;
                }
                post
            }
            (Ok(Some(post)), None) => post,
            (Ok(None), new_image) => {
                if let Some(orphan) = new_image {
                    state.images.delete_image(&orphan).await;
                }
                return Err(not_found(&id));
            }
            (Err(e), new_image) => {
                if let Some(orphan) = new_image {
                    state.images.delete_image(&orphan).await;
                }
                return Err(e.into());
            }
        }
    } else {
        let update: PostUpdate = form::read_json(payload).await?;
        update.validate()?;
        state
            .posts
            .update(&id, update)
            .await?
            .ok_or_else(|| not_found(&id))?
    };

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if !state.posts.delete(&id).await? {
        return Err(not_found(&id));
    }

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// PATCH /api/posts/{id} - flip the active flag.
pub async fn toggle_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .toggle_status(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts/bulk-delete
pub async fn bulk_delete(
    state: web::Data<AppState>,
    body: web::Json<BulkIdsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_ids(&req.ids)?;

    let deleted = state.posts.bulk_delete(&req.ids).await?;
    tracing::info!(requested = req.ids.len(), deleted, "Bulk delete");

    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, NO_STORE))
        .json(BulkDeleteResponse::new(deleted)))
}

/// POST /api/posts/bulk-update
pub async fn bulk_update(
    state: web::Data<AppState>,
    body: web::Json<BulkStatusRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_ids(&req.ids)?;
    let active = req
        .active
        .ok_or_else(|| AppError::BadRequest("active must be a boolean value".to_string()))?;

    let updated = state.posts.bulk_update_status(&req.ids, active).await?;
    tracing::info!(requested = req.ids.len(), updated, active, "Bulk status update");

    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, NO_STORE))
        .json(BulkUpdateResponse::new(updated)))
}

/// PUT /api/posts/reorder
pub async fn reorder_posts(
    state: web::Data<AppState>,
    body: web::Json<ReorderRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.post_ids.is_empty() {
        return Err(AppError::BadRequest(
            "postIds must be a non-empty array".to_string(),
        ));
    }

    state.posts.reorder(&req.post_ids).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// GET /api/posts/stats
pub async fn post_stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.posts.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use shop_core::StoreError;
    use shop_core::domain::{NewPost, Post, PostPage, PostQuery, PostStats, PostUpdate};
    use shop_core::ports::PostRepository;
    use tempfile::TempDir;

    use crate::handlers::test_support::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

    async fn setup() -> (TempDir, crate::state::AppState) {
        let dir = TempDir::new().unwrap();
        let state = test_state(&test_config(&dir)).await;
        (dir, state)
    }

    fn json_post(title: &str) -> Value {
        json!({
            "title": title,
            "image": "/images/posts/seed.png",
            "product_url": "https://example.com/buy",
        })
    }

    macro_rules! create {
        ($app:expr, $title:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json_post($title))
                .to_request();
            let res = test::call_service(&$app, req).await;
            assert_eq!(res.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(res).await;
            body
        }};
    }

    #[actix_rt::test]
    async fn test_create_then_list() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);

        let first = create!(app, "Desk Lamp");
        let second = create!(app, "USB Cable");
        assert_eq!(first["order"], 0);
        assert_eq!(second["order"], 1);
        assert_eq!(first["active"], true);
        assert!(first["createdAt"].is_string());

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["posts"].as_array().unwrap().len(), 2);
        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["pagination"]["limit"], Value::Null);
        assert_eq!(body["pagination"]["total"], 2);
    }

    #[actix_rt::test]
    async fn test_create_rejects_missing_fields() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "No image" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 400);
        assert!(body["detail"].as_str().unwrap().contains("image"));
    }

    #[actix_rt::test]
    async fn test_list_paginates_and_searches() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);

        for i in 0..12 {
            create!(app, &format!("Gadget {i}"));
        }
        create!(app, "Desk Lamp");

        let req = test::TestRequest::get()
            .uri("/api/posts?page=2&limit=5")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["posts"].as_array().unwrap().len(), 5);
        assert_eq!(body["pagination"]["pages"], 3);
        assert_eq!(body["pagination"]["total"], 13);

        let req = test::TestRequest::get()
            .uri("/api/posts?page=1&search=gadget")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["pagination"]["limit"], 10);
        assert_eq!(body["pagination"]["total"], 12);
        assert_eq!(body["pagination"]["pages"], 2);
    }

    #[actix_rt::test]
    async fn test_invalid_sort_is_bad_request() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/posts?sortBy=popularity")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_update_toggle_delete() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);
        let post = create!(app, "Desk Lamp");
        let id = post["id"].as_str().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}"))
            .set_json(json!({ "title": "Floor Lamp", "id": "hijack" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["title"], "Floor Lamp");
        assert_eq!(updated["id"], id);
        assert_eq!(updated["createdAt"], post["createdAt"]);

        let req = test::TestRequest::patch()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        let toggled: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(toggled["active"], false);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        let deleted: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(deleted["success"], true);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_unknown_post_is_not_found() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);

        let req = test::TestRequest::patch()
            .uri("/api/posts/missing")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::put()
            .uri("/api/posts/missing")
            .set_json(json!({ "title": "x" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_rt::test]
    async fn test_bulk_endpoints() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);
        let a = create!(app, "A");
        let b = create!(app, "B");
        create!(app, "C");

        let req = test::TestRequest::post()
            .uri("/api/posts/bulk-update")
            .set_json(json!({ "ids": [a["id"], b["id"], "ghost"], "active": false }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(
            res.headers().get("cache-control").unwrap(),
            "no-store, no-cache, must-revalidate, max-age=0"
        );
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["updated"], 2);
        assert_eq!(body["message"], "Successfully updated 2 post(s)");

        let req = test::TestRequest::get().uri("/api/posts/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats, json!({ "total": 3, "active": 1, "inactive": 2 }));

        let req = test::TestRequest::post()
            .uri("/api/posts/bulk-delete")
            .set_json(json!({ "ids": [a["id"], "ghost"] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["deleted"], 1);
    }

    #[actix_rt::test]
    async fn test_bulk_validation() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts/bulk-delete")
            .set_json(json!({ "ids": [] }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::post()
            .uri("/api/posts/bulk-update")
            .set_json(json!({ "ids": ["a"] }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "active must be a boolean value");

        let req = test::TestRequest::post()
            .uri("/api/posts/bulk-update")
            .set_json(json!({ "ids": ["a"], "active": "yes" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_rt::test]
    async fn test_reorder() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);
        let a = create!(app, "A");
        let b = create!(app, "B");
        let c = create!(app, "C");

        let req = test::TestRequest::put()
            .uri("/api/posts/reorder")
            .set_json(json!({ "postIds": [c["id"], a["id"], b["id"]] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let titles: Vec<&str> = body["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["C", "A", "B"]);

        let req = test::TestRequest::put()
            .uri("/api/posts/reorder")
            .set_json(json!({ "postIds": [] }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_rt::test]
    async fn test_published_feed() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);
        let a = create!(app, "A");
        create!(app, "B");
        create!(app, "C");

        let req = test::TestRequest::patch()
            .uri(&format!("/api/posts/{}", a["id"].as_str().unwrap()))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/api/posts/published?skip=0&limit=1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["posts"].as_array().unwrap().len(), 1);
        assert_eq!(body["posts"][0]["title"], "C");
    }

    #[actix_rt::test]
    async fn test_published_degrades_on_corrupt_store() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let state = test_state(&config).await;
        std::fs::write(config.data_dir.join("posts.json"), "{ not json").unwrap();
        let app = init_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/posts/published")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "posts": [], "total": 0 }));

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    fn multipart_post(title: &str, image: Option<(&str, &str)>) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(text_part("title", title).as_bytes());
        body.extend_from_slice(text_part("product_url", "https://example.com/buy").as_bytes());
        body.extend_from_slice(text_part("yt_url", "").as_bytes());
        if let Some((filename, content_type)) = image {
            body.extend(file_part("image", filename, content_type, PNG));
        }
        close(body)
    }

    #[actix_rt::test]
    async fn test_multipart_create_stores_image() {
        let (dir, state) = setup().await;
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp", Some(("lamp.png", "image/png"))))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let post: Value = test::read_body_json(res).await;
        let image = post["image"].as_str().unwrap();
        assert!(image.starts_with("/images/posts/"));
        assert!(image.ends_with(".png"));
        assert!(post.get("yt_url").is_none());

        let file_name = image.rsplit('/').next().unwrap();
        let stored = dir.path().join("public/images/posts").join(file_name);
        assert_eq!(std::fs::read(stored).unwrap(), PNG);
    }

    #[actix_rt::test]
    async fn test_multipart_create_rejects_non_images() {
        let (_dir, state) = setup().await;
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp", Some(("notes.txt", "text/plain"))))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp", None))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_rt::test]
    async fn test_multipart_create_enforces_size_cap() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.max_image_bytes = 4;
        let state = test_state(&config).await;
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp", Some(("lamp.png", "image/png"))))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_rt::test]
    async fn test_multipart_update_replaces_image() {
        let (dir, state) = setup().await;
        let app = init_app!(state);
        let images = dir.path().join("public/images/posts");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp", Some(("lamp.png", "image/png"))))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let old_image = created["image"].as_str().unwrap().to_string();
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp v2", Some(("lamp2.png", "image/png"))))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["title"], "Desk Lamp v2");
        assert_ne!(updated["image"], old_image.as_str());

        let old_file = images.join(old_image.rsplit('/').next().unwrap());
        assert!(!old_file.exists());
        assert_eq!(std::fs::read_dir(&images).unwrap().count(), 1);

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp v3", None))
            .to_request();
        let kept: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(kept["image"], updated["image"]);
    }

    /// Delegates reads and fails every create/update.
    struct FailingWrites {
        inner: Arc<dyn PostRepository>,
    }

    fn write_failure() -> StoreError {
        StoreError::Io("disk full".into())
    }

    #[async_trait]
    impl PostRepository for FailingWrites {
        async fn list(&self, query: &PostQuery) -> Result<PostPage, StoreError> {
            self.inner.list(query).await
        }

        async fn list_active(
            &self,
            skip: usize,
            limit: usize,
        ) -> Result<(Vec<Post>, usize), StoreError> {
            self.inner.list_active(skip, limit).await
        }

        async fn find(&self, id: &str) -> Result<Option<Post>, StoreError> {
            self.inner.find(id).await
        }

        async fn create(&self, _data: NewPost) -> Result<Post, StoreError> {
            Err(write_failure())
        }

        async fn update(
            &self,
            _id: &str,
            _update: PostUpdate,
        ) -> Result<Option<Post>, StoreError> {
            Err(write_failure())
        }

        async fn delete(&self, id: &str) -> Result<bool, StoreError> {
            self.inner.delete(id).await
        }

        async fn bulk_delete(&self, ids: &[String]) -> Result<usize, StoreError> {
            self.inner.bulk_delete(ids).await
        }

        async fn toggle_status(&self, id: &str) -> Result<Option<Post>, StoreError> {
            self.inner.toggle_status(id).await
        }

        async fn bulk_update_status(
            &self,
            ids: &[String],
            active: bool,
        ) -> Result<usize, StoreError> {
            self.inner.bulk_update_status(ids, active).await
        }

        async fn reorder(&self, ids: &[String]) -> Result<(), StoreError> {
            self.inner.reorder(ids).await
        }

        async fn stats(&self) -> Result<PostStats, StoreError> {
            self.inner.stats().await
        }

        async fn search_active(
            &self,
            query: &str,
            limit: usize,
        ) -> Result<Vec<Post>, StoreError> {
            self.inner.search_active(query, limit).await
        }
    }

    fn image_count(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path().join("public/images/posts"))
            .unwrap()
            .count()
    }

    #[actix_rt::test]
    async fn test_failed_create_removes_upload_when_document_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let state = test_state(&config).await;
        std::fs::write(config.data_dir.join("posts.json"), "{ not json").unwrap();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp", Some(("lamp.png", "image/png"))))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(image_count(&dir), 0);
    }

    #[actix_rt::test]
    async fn test_failed_create_removes_upload() {
        let (dir, mut state) = setup().await;
        state.posts = Arc::new(FailingWrites {
            inner: state.posts.clone(),
        });
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp", Some(("lamp.png", "image/png"))))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(image_count(&dir), 0);
    }

    #[actix_rt::test]
    async fn test_failed_update_removes_new_upload_and_keeps_old_image() {
        let (dir, mut state) = setup().await;

        let create = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp", Some(("lamp.png", "image/png"))))
            .to_request();
        let created: Value = {
            let app = init_app!(state.clone());
            test::call_and_read_body_json(&app, create).await
        };
        let id = created["id"].as_str().unwrap();
        let old_file = created["image"].as_str().unwrap().rsplit('/').next().unwrap();
        assert_eq!(image_count(&dir), 1);

        state.posts = Arc::new(FailingWrites {
            inner: state.posts.clone(),
        });
        let app = init_app!(state);

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(("content-type", multipart_content_type()))
            .set_payload(multipart_post("Desk Lamp v2", Some(("lamp2.png", "image/png"))))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        assert_eq!(image_count(&dir), 1);
        assert!(dir.path().join("public/images/posts").join(old_file).exists());
    }
}
