use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostPage, PostQuery, PostStats, PostUpdate};
use crate::error::StoreError;

/// Post repository - every read and write over the post collection.
///
/// Implementations re-read the whole collection for each call and rewrite it
/// in full on mutation.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Filtered, sorted, optionally paginated admin listing.
    async fn list(&self, query: &PostQuery) -> Result<PostPage, StoreError>;

    /// Active posts, newest first, with the total number of active posts.
    async fn list_active(&self, skip: usize, limit: usize)
    -> Result<(Vec<Post>, usize), StoreError>;

    async fn find(&self, id: &str) -> Result<Option<Post>, StoreError>;

    /// Append a new active post at the end of the manual order.
    async fn create(&self, data: NewPost) -> Result<Post, StoreError>;

    /// Merge `update` onto the post. `Ok(None)` if the id is unknown.
    async fn update(&self, id: &str, update: PostUpdate) -> Result<Option<Post>, StoreError>;

    /// Remove the post and, best effort, its image. `Ok(false)` if unknown.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Remove every listed post; returns how many existed.
    async fn bulk_delete(&self, ids: &[String]) -> Result<usize, StoreError>;

    async fn toggle_status(&self, id: &str) -> Result<Option<Post>, StoreError>;

    /// Set `active` on every listed post; returns how many matched.
    async fn bulk_update_status(&self, ids: &[String], active: bool)
    -> Result<usize, StoreError>;

    /// Assign `order = index` along `ids`; unlisted posts follow.
    async fn reorder(&self, ids: &[String]) -> Result<(), StoreError>;

    async fn stats(&self) -> Result<PostStats, StoreError>;

    /// Case-insensitive title search among active posts.
    async fn search_active(&self, query: &str, limit: usize) -> Result<Vec<Post>, StoreError>;
}
