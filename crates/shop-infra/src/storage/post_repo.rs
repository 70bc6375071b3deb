//! Post repository over the JSON file store.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use shop_core::StoreError;
use shop_core::catalog;
use shop_core::domain::{NewPost, Post, PostPage, PostQuery, PostStats, PostUpdate};
use shop_core::ports::{ImageStore, PostRepository};

use super::JsonFileStore;

/// Post repository backed by [`JsonFileStore`].
///
/// Each call is one read-modify-write cycle over the whole document. Removing
/// a post also removes its image through the [`ImageStore`], best effort.
pub struct JsonPostRepository {
    store: Arc<JsonFileStore>,
    images: Arc<dyn ImageStore>,
}

impl JsonPostRepository {
    pub fn new(store: Arc<JsonFileStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { store, images }
    }

    async fn remove_images(&self, posts: &[Post]) {
        for post in posts.iter().filter(|p| !p.image.is_empty()) {
            self.images.delete_image(&post.image).await;
        }
    }
}

#[async_trait]
impl PostRepository for JsonPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<PostPage, StoreError> {
        let posts = self.store.load_posts().await?;
        Ok(catalog::query_posts(posts, query))
    }

    async fn list_active(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<Post>, usize), StoreError> {
        let posts = self.store.load_posts().await?;
        let total = catalog::count_active(&posts);
        Ok((catalog::active_feed(posts, skip, limit), total))
    }

    async fn find(&self, id: &str) -> Result<Option<Post>, StoreError> {
        let posts = self.store.load_posts().await?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    async fn create(&self, data: NewPost) -> Result<Post, StoreError> {
        let mut posts = self.store.load_posts().await?;
        let post = Post::new(data, catalog::next_order(&posts));

        posts.push(post.clone());
        self.store.save(posts).await?;

        tracing::info!(post_id = %post.id, order = post.order, "Created post");
        Ok(post)
    }

    async fn update(&self, id: &str, update: PostUpdate) -> Result<Option<Post>, StoreError> {
        let mut posts = self.store.load_posts().await?;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        post.apply(update);
        let updated = post.clone();
        self.store.save(posts).await?;

        tracing::info!(post_id = %id, "Updated post");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut posts = self.store.load_posts().await?;
        let Some(index) = posts.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let removed = posts.remove(index);
        self.store.save(posts).await?;
        self.remove_images(std::slice::from_ref(&removed)).await;

        tracing::info!(post_id = %id, "Deleted post");
        Ok(true)
    }

    async fn bulk_delete(&self, ids: &[String]) -> Result<usize, StoreError> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let (removed, kept): (Vec<Post>, Vec<Post>) = self
            .store
            .load_posts()
            .await?
            .into_iter()
            .partition(|p| wanted.contains(p.id.as_str()));

        if removed.is_empty() {
            return Ok(0);
        }

        self.store.save(kept).await?;
        self.remove_images(&removed).await;

        tracing::info!(deleted = removed.len(), "Bulk deleted posts");
        Ok(removed.len())
    }

    async fn toggle_status(&self, id: &str) -> Result<Option<Post>, StoreError> {
        let mut posts = self.store.load_posts().await?;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        post.active = !post.active;
        let toggled = post.clone();
        self.store.save(posts).await?;

        tracing::info!(post_id = %id, active = toggled.active, "Toggled post status");
        Ok(Some(toggled))
    }

    async fn bulk_update_status(&self, ids: &[String], active: bool) -> Result<usize, StoreError> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut posts = self.store.load_posts().await?;

        let mut updated = 0;
        for post in posts.iter_mut().filter(|p| wanted.contains(p.id.as_str())) {
            post.active = active;
            updated += 1;
        }

        if updated > 0 {
            self.store.save(posts).await?;
        }

        tracing::info!(updated, active, "Bulk updated post status");
        Ok(updated)
    }

    async fn reorder(&self, ids: &[String]) -> Result<(), StoreError> {
        let posts = self.store.load_posts().await?;
        let reordered = catalog::reorder(posts, ids);
        self.store.save(reordered).await?;

        tracing::info!(listed = ids.len(), "Reordered posts");
        Ok(())
    }

    async fn stats(&self) -> Result<PostStats, StoreError> {
        let posts = self.store.load_posts().await?;
        Ok(catalog::stats(&posts))
    }

    async fn search_active(&self, query: &str, limit: usize) -> Result<Vec<Post>, StoreError> {
        let posts = self.store.load_posts().await?;
        Ok(catalog::search_active(posts, query, limit))
    }
}
