//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

use shop_core::domain::{NewPost, Post, PostQuery, SortBy, StatusFilter};

/// Request to log into the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<SortBy>,
    pub status: Option<StatusFilter>,
    pub search: Option<String>,
}

impl ListPostsParams {
    pub fn to_query(&self) -> PostQuery {
        PostQuery {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            search: self.search.clone(),
        }
    }
}

/// Query string of `GET /api/posts/published`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishedParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// Query string of `GET /api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    /// `None` when the listing was not paginated.
    pub limit: Option<usize>,
    pub total: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedResponse {
    pub posts: Vec<Post>,
    pub total: usize,
}

/// Compact search result for the public search dropdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub image: String,
    pub product_url: String,
}

impl From<Post> for SearchHit {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            image: post.image,
            product_url: post.product_url,
        }
    }
}

/// JSON body of `POST /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: String,
    pub image: String,
    pub yt_url: Option<String>,
    pub product_url: String,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            image: req.image,
            yt_url: req.yt_url,
            product_url: req.product_url,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkIdsRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkStatusRequest {
    pub ids: Vec<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderRequest {
    #[serde(rename = "postIds")]
    pub post_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub success: bool,
    pub deleted: usize,
    pub message: String,
}

impl BulkDeleteResponse {
    pub fn new(deleted: usize) -> Self {
        Self {
            success: true,
            deleted,
            message: format!("Successfully deleted {deleted} post(s)"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUpdateResponse {
    pub success: bool,
    pub updated: usize,
    pub message: String,
}

impl BulkUpdateResponse {
    pub fn new(updated: usize) -> Self {
        Self {
            success: true,
            updated,
            message: format!("Successfully updated {updated} post(s)"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupCreatedResponse {
    #[serde(rename = "backupName")]
    pub backup_name: String,
}
